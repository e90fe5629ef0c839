// Session
pub const SESSION_DURATION_MS: u64 = 60_000;
pub const LANE_COUNT: usize = 4;

// Beat lifecycle
pub const BEAT_LIFETIME_MS: u64 = 3_000;
pub const MAX_LIVE_BEATS: usize = 50;
pub const SPAWN_TOLERANCE_MS: f32 = 50.0;

// Judging
pub const EXPECTED_HIT_PROGRESS: f32 = 0.85;
pub const HIT_WINDOW_PROGRESS: f32 = 0.25;
pub const PERFECT_WINDOW_PROGRESS: f32 = 0.08;
pub const HIT_WINDOW_MS: f32 = 200.0;
pub const PERFECT_WINDOW_MS: f32 = 50.0;

// Scoring
pub const PERFECT_POINTS: u32 = 100;
pub const GOOD_POINTS: u32 = 50;
pub const COMBO_MULTIPLIER_STEP: u32 = 5;

// Combo rewards
pub const COMBO_REWARD_CADENCE: u32 = 6;
pub const COMBO_REWARD_COOLDOWN_MS: u64 = 4_000;
pub const COMBO_REWARD_VARIANTS: u8 = 3;

// Crowd
pub const MAX_CROWD_SIZE: u32 = 50;
pub const CROWD_SCORE_STEP: u32 = 200;
pub const CROWD_COMBO_MILESTONES: [u32; 6] = [3, 6, 10, 15, 20, 25];
pub const CROWD_MISS_WINDOW_MS: u64 = 10_000;
pub const CROWD_MISSES_TO_SHRINK: usize = 3;
pub const CROWD_CAP_BONUS_POINTS: u32 = 50;

// Commentary
pub const COMMENTARY_INTERVAL_MS: u64 = 10_000;
