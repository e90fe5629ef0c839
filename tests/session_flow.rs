// Whole-session scenarios driving the engine the way a host frame loop does.

use sundown::game::session::{self, SessionState};
use sundown::{
    is_new_high_score, Genre, JudgeGrade, LeaderboardStore, MemoryLeaderboard, NullHooks,
    SessionHooks, SessionPhase, SessionSummary,
};

const FRAME_MS: u64 = 16;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
struct EndCapture {
    summaries: Vec<SessionSummary>,
}

impl SessionHooks for EndCapture {
    fn on_session_end(&mut self, summary: &SessionSummary) {
        self.summaries.push(summary.clone());
    }
}

/// Advances frames, pressing each live beat's lane at its ideal hit offset.
fn play_through(state: &mut SessionState, hooks: &mut dyn SessionHooks, until_ms: u64) -> u32 {
    let fall = state.scheduler.fall_duration_ms();
    let ideal_age = (fall as f32 * 0.85) as u64;
    let mut hits = 0;

    let mut now = 0;
    while now <= until_ms && state.phase == SessionPhase::Playing {
        session::tick(state, hooks, now);

        let due: Vec<_> = state
            .beats
            .iter()
            .filter(|b| b.age_ms(now) >= ideal_age)
            .copied()
            .collect();
        for beat in due {
            let judged = session::handle_lane_press(state, hooks, beat.lane, now);
            if judged.is_some_and(|j| j.grade.is_hit()) {
                hits += 1;
            }
        }
        now += FRAME_MS;
    }
    hits
}

#[test]
fn gqom_session_first_beat_perfect() {
    init_logging();
    let mut hooks = NullHooks;
    let mut state = SessionState::with_seed(Genre::Gqom, 21);
    session::start(&mut state, Genre::Gqom, 100_000);

    // 140 BPM: round((100 / 140) * 2500) = 1786 ms of fall.
    assert_eq!(state.scheduler.fall_duration_ms(), 1_786);

    session::tick(&mut state, &mut hooks, 100_000);
    let beat = state.beats.iter().next().copied().expect("beat at t=0");

    let judged = session::handle_lane_press(&mut state, &mut hooks, beat.lane, 100_000 + 1_518)
        .expect("a live beat gets judged");
    assert_eq!(judged.grade, JudgeGrade::Perfect);
    assert_eq!(state.scoring.score, 100);
    assert_eq!(state.scoring.combo, 1);
}

#[test]
fn a_full_session_ends_exactly_once_with_a_recap() {
    init_logging();
    let mut hooks = EndCapture::default();
    let mut state = SessionState::with_seed(Genre::DeepHouse, 77);
    session::start(&mut state, Genre::DeepHouse, 0);

    let hits = play_through(&mut state, &mut hooks, 62_000);
    assert!(hits > 20, "expected a busy session, got {} hits", hits);
    assert_eq!(state.phase, SessionPhase::Ended);
    assert_eq!(hooks.summaries.len(), 1);

    let summary = &hooks.summaries[0];
    assert_eq!(summary.score, state.scoring.score);
    assert_eq!(summary.max_combo, state.scoring.max_combo);
    assert!(summary.average_accuracy > 0);
    assert!(summary.average_accuracy <= 100);
    assert_eq!(summary.recap.tracks.len(), 6);

    // The frozen summary matches what the hook saw.
    assert_eq!(state.summary.as_ref(), Some(summary));
}

#[test]
fn scores_and_combos_never_regress_during_play() {
    let mut hooks = NullHooks;
    let mut state = SessionState::with_seed(Genre::Amapiano, 5);
    session::start(&mut state, Genre::Amapiano, 0);

    let mut last_score = 0;
    let mut last_max_combo = 0;
    let mut now = 0;
    while now <= 20_000 {
        session::tick(&mut state, &mut hooks, now);
        // Mash lane 0 every frame: a blend of hits, misses, and no-ops.
        session::handle_lane_press(&mut state, &mut hooks, 0, now);
        assert!(state.scoring.score >= last_score);
        assert!(state.scoring.max_combo >= last_max_combo);
        last_score = state.scoring.score;
        last_max_combo = state.scoring.max_combo;
        now += FRAME_MS;
    }
}

#[test]
fn live_beats_stay_bounded_without_input() {
    let mut hooks = NullHooks;
    let mut state = SessionState::with_seed(Genre::Gqom, 13);
    session::start(&mut state, Genre::Gqom, 0);

    let mut now = 0;
    while now < 60_000 && state.phase == SessionPhase::Playing {
        session::tick(&mut state, &mut hooks, now);
        assert!(state.beats.len() <= 50);
        now += FRAME_MS;
    }
}

#[test]
fn session_summary_feeds_the_high_score_flow() {
    let mut hooks = EndCapture::default();
    let mut state = SessionState::with_seed(Genre::Gqom, 3);
    session::start(&mut state, Genre::Gqom, 0);
    play_through(&mut state, &mut hooks, 62_000);
    let summary = &hooks.summaries[0];
    assert!(summary.score > 0);

    let mut store = MemoryLeaderboard::new();
    let board = store.load();
    assert!(is_new_high_score(&board, Genre::Gqom, summary.score));

    let outcome = store.submit(Genre::Gqom, "  ", summary.score).unwrap();
    assert!(outcome.success);
    let entry = outcome.leaderboard.entry(Genre::Gqom).unwrap();
    assert_eq!(entry.username, "Anonymous");
    assert_eq!(entry.score, summary.score);

    // A rerun of the same score is not a new high score.
    assert!(!is_new_high_score(&store.load(), Genre::Gqom, summary.score));
}
