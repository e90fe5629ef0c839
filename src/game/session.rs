use crate::config::{LANE_COUNT, SESSION_DURATION_MS};
use crate::game::beat::BeatStore;
use crate::game::commentary::CommentaryState;
use crate::game::hooks::SessionHooks;
use crate::game::judgment::{self, JudgeGrade, Judgment};
use crate::game::scheduler::Scheduler;
use crate::game::scoring::{self, ScoringState};
use crate::game::setlist::{self, SessionRecap};
use crate::game::timing::Genre;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Playing,
    Ended,
}

/// End-of-session aggregate handed to the leaderboard flow.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub score: u32,
    pub max_combo: u32,
    /// Rounded mean of the per-hit accuracy percentages, 0 with no hits.
    pub average_accuracy: u32,
    pub crowd_size: u32,
    pub recap: SessionRecap,
}

/// All mutable state of one play session. Owned by the caller driving the
/// frame loop; the other game modules only see it for the duration of one
/// `tick` or `handle_lane_press` call.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub genre: Genre,
    pub start_timestamp_ms: u64,
    pub elapsed_ms: u64,
    pub beats: BeatStore,
    pub scheduler: Scheduler,
    pub scoring: ScoringState,
    pub commentary: CommentaryState,
    pub summary: Option<SessionSummary>,
    rng: StdRng,
}

impl SessionState {
    pub fn new(genre: Genre) -> Self {
        Self::with_rng(genre, StdRng::from_os_rng())
    }

    /// Fixed-seed constructor, for deterministic lane sequences and recaps.
    pub fn with_seed(genre: Genre, seed: u64) -> Self {
        Self::with_rng(genre, StdRng::seed_from_u64(seed))
    }

    fn with_rng(genre: Genre, rng: StdRng) -> Self {
        Self {
            phase: SessionPhase::Idle,
            genre,
            start_timestamp_ms: 0,
            elapsed_ms: 0,
            beats: BeatStore::new(),
            scheduler: Scheduler::new(genre.bpm()),
            scoring: ScoringState::new(),
            commentary: CommentaryState::new(),
            summary: None,
            rng,
        }
    }
}

/// Begins a session at `now_ms`, fully resetting any prior session state.
/// Valid from any phase; a replay from Ended leaks nothing.
pub fn start(state: &mut SessionState, genre: Genre, now_ms: u64) {
    state.phase = SessionPhase::Playing;
    state.genre = genre;
    state.start_timestamp_ms = now_ms;
    state.elapsed_ms = 0;
    state.beats.clear();
    state.scheduler = Scheduler::new(genre.bpm());
    state.scoring = ScoringState::new();
    state.commentary = CommentaryState::new();
    state.summary = None;
    info!("session started: {} at {} BPM", genre.as_str(), genre.bpm());
}

/// One frame step: advance the clock, prune expired beats, run the spawn
/// opportunity, surface commentary. Transitions to Ended once the session
/// duration elapses; after that every call is a no-op.
pub fn tick(state: &mut SessionState, hooks: &mut dyn SessionHooks, now_ms: u64) {
    if state.phase != SessionPhase::Playing {
        return;
    }

    // Clock skew clamps to zero rather than running the session backwards.
    let elapsed = now_ms.saturating_sub(state.start_timestamp_ms);
    state.elapsed_ms = elapsed;

    if elapsed >= SESSION_DURATION_MS {
        finish(state, hooks);
        return;
    }

    state.beats.prune_expired(elapsed);
    state.scheduler.try_spawn(&mut state.beats, elapsed, &mut state.rng);

    if let Some(line) = state.commentary.tick(elapsed, &mut state.rng) {
        hooks.on_commentary(line);
    }
}

/// Ends the session early. Same terminal transition as the timer running out.
pub fn abort(state: &mut SessionState, hooks: &mut dyn SessionHooks) {
    if state.phase == SessionPhase::Playing {
        finish(state, hooks);
    }
}

fn finish(state: &mut SessionState, hooks: &mut dyn SessionHooks) {
    state.phase = SessionPhase::Ended;
    let summary = SessionSummary {
        score: state.scoring.score,
        max_combo: state.scoring.max_combo,
        average_accuracy: state.scoring.average_accuracy(),
        crowd_size: state.scoring.crowd.size,
        recap: setlist::build_recap(&mut state.rng),
    };
    info!(
        "session ended: score {} max combo {} accuracy {}% crowd {}",
        summary.score, summary.max_combo, summary.average_accuracy, summary.crowd_size
    );
    hooks.on_session_end(&summary);
    state.summary = Some(summary);
}

/// Judges a lane press against the clock value at the moment of the press.
/// Returns `None` when the press is a scoring no-op: session not playing,
/// lane out of range, or no live beat in the lane.
pub fn handle_lane_press(
    state: &mut SessionState,
    hooks: &mut dyn SessionHooks,
    lane: usize,
    now_ms: u64,
) -> Option<Judgment> {
    if state.phase != SessionPhase::Playing {
        return None;
    }
    if lane >= LANE_COUNT {
        warn!("ignoring press for out-of-range lane {}", lane);
        return None;
    }

    let now = now_ms.saturating_sub(state.start_timestamp_ms);
    let fall = state.scheduler.fall_duration_ms();
    let candidate = judgment::best_candidate(state.beats.lane(lane), now, fall)?;
    let eval = judgment::evaluate_press(candidate.age_ms(now), fall);

    if eval.grade.is_hit() {
        state.beats.remove(lane, candidate.id);
        let percent = judgment::accuracy_percent(eval.accuracy);
        let applied = scoring::apply_hit(&mut state.scoring, eval.grade, percent, now, &mut state.rng);
        info!(
            "hit: lane {} {:?} {:.1}% combo {} (+{})",
            lane, eval.grade, percent, state.scoring.combo, applied.score_delta
        );
        hooks.on_hit(lane, eval.grade, percent);
        if let Some(reward) = applied.reward {
            hooks.on_combo_reward(&reward);
        }
        Some(Judgment {
            grade: eval.grade,
            lane,
            accuracy_percent: Some(percent),
        })
    } else {
        // The beat stays live: a miss is a judged press, not a removal.
        scoring::apply_miss(&mut state.scoring, now);
        info!("miss: lane {} (streak {})", lane, state.scoring.miss_streak);
        hooks.on_miss(lane);
        Some(Judgment {
            grade: JudgeGrade::Miss,
            lane,
            accuracy_percent: None,
        })
    }
}
