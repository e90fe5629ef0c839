use crate::config::{
    COMBO_MULTIPLIER_STEP, COMBO_REWARD_CADENCE, COMBO_REWARD_COOLDOWN_MS, COMBO_REWARD_VARIANTS,
    CROWD_CAP_BONUS_POINTS, CROWD_COMBO_MILESTONES, CROWD_MISSES_TO_SHRINK, CROWD_MISS_WINDOW_MS,
    CROWD_SCORE_STEP, MAX_CROWD_SIZE,
};
use crate::game::judgment::{grade_points_for, JudgeGrade};
use rand::rngs::StdRng;
use rand::Rng;

/// Fired when a combo run crosses the reward cadence. The variant selects
/// which reward presentation the host plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComboReward {
    pub combo: u32,
    pub variant: u8,
}

#[derive(Clone, Debug, Default)]
pub struct CrowdState {
    pub size: u32,
    last_score_threshold: u32,
    milestones_fired: [bool; CROWD_COMBO_MILESTONES.len()],
    recent_miss_times_ms: Vec<u64>,
}

#[derive(Clone, Debug)]
pub struct ScoringState {
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub miss_streak: u32,
    pub accuracy_samples: Vec<f32>,
    pub reward_cadence: u32,
    last_reward_at_ms: Option<u64>,
    pub crowd: CrowdState,
}

impl ScoringState {
    pub fn new() -> Self {
        Self {
            score: 0,
            combo: 0,
            max_combo: 0,
            miss_streak: 0,
            accuracy_samples: Vec::new(),
            reward_cadence: COMBO_REWARD_CADENCE,
            last_reward_at_ms: None,
            crowd: CrowdState::default(),
        }
    }

    pub fn average_accuracy(&self) -> u32 {
        if self.accuracy_samples.is_empty() {
            return 0;
        }
        let sum: f32 = self.accuracy_samples.iter().sum();
        (sum / self.accuracy_samples.len() as f32).round() as u32
    }
}

impl Default for ScoringState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug)]
pub struct HitApplied {
    pub score_delta: u32,
    pub reward: Option<ComboReward>,
}

#[derive(Copy, Clone, Debug)]
pub struct MissApplied {
    pub crowd_shrunk: bool,
}

// At the crowd cap a growth trigger pays out points instead.
fn grow_crowd(state: &mut ScoringState) {
    if state.crowd.size < MAX_CROWD_SIZE {
        state.crowd.size += 1;
    } else {
        state.score = state.score.saturating_add(CROWD_CAP_BONUS_POINTS);
    }
}

fn check_combo_reward(state: &mut ScoringState, now_ms: u64, rng: &mut StdRng) -> Option<ComboReward> {
    if state.reward_cadence == 0 || state.combo == 0 || state.combo % state.reward_cadence != 0 {
        return None;
    }
    let cooled_down = state
        .last_reward_at_ms
        .map_or(true, |t| now_ms.saturating_sub(t) >= COMBO_REWARD_COOLDOWN_MS);
    if !cooled_down {
        return None;
    }
    state.last_reward_at_ms = Some(now_ms);
    Some(ComboReward {
        combo: state.combo,
        variant: rng.random_range(0..COMBO_REWARD_VARIANTS),
    })
}

/// Applies a Perfect or Good judgment: combo-scaled score delta, accuracy
/// sample, combo bookkeeping, crowd growth, reward check.
pub fn apply_hit(
    state: &mut ScoringState,
    grade: JudgeGrade,
    accuracy_percent: f32,
    now_ms: u64,
    rng: &mut StdRng,
) -> HitApplied {
    let points = grade_points_for(grade);
    let new_combo = state.combo + 1;
    let multiplier = new_combo / COMBO_MULTIPLIER_STEP + 1;
    let score_delta = points * multiplier;

    state.score = state.score.saturating_add(score_delta);
    state.combo = new_combo;
    state.max_combo = state.max_combo.max(new_combo);
    state.miss_streak = 0;
    state.accuracy_samples.push(accuracy_percent);

    // One growth per score-threshold crossing, even if a single delta jumps
    // several steps.
    let threshold = (state.score / CROWD_SCORE_STEP) * CROWD_SCORE_STEP;
    if threshold > state.crowd.last_score_threshold {
        state.crowd.last_score_threshold = threshold;
        grow_crowd(state);
    }

    if let Some(slot) = CROWD_COMBO_MILESTONES.iter().position(|&m| m == new_combo) {
        if !state.crowd.milestones_fired[slot] {
            state.crowd.milestones_fired[slot] = true;
            grow_crowd(state);
        }
    }

    let reward = check_combo_reward(state, now_ms, rng);

    HitApplied {
        score_delta,
        reward,
    }
}

/// Applies a Miss judgment: combo reset, miss-streak bump, and the rolling
/// miss window that thins the crowd.
pub fn apply_miss(state: &mut ScoringState, now_ms: u64) -> MissApplied {
    state.combo = 0;
    state.miss_streak = state.miss_streak.saturating_add(1);

    state
        .crowd
        .recent_miss_times_ms
        .retain(|&t| now_ms.saturating_sub(t) < CROWD_MISS_WINDOW_MS);
    state.crowd.recent_miss_times_ms.push(now_ms);

    if state.crowd.recent_miss_times_ms.len() >= CROWD_MISSES_TO_SHRINK {
        state.crowd.size = state.crowd.size.saturating_sub(1);
        state.crowd.recent_miss_times_ms.clear();
        return MissApplied { crowd_shrunk: true };
    }
    MissApplied { crowd_shrunk: false }
}
