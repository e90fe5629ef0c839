//! Four-lane rhythm session engine: tempo-driven beat scheduling, tolerance
//! window hit judging, combo-scaled scoring, and a cross-session high-score
//! leaderboard. Rendering and audio stay on the host side of the
//! [`SessionHooks`] seam.

pub mod config;
pub mod game;
pub mod network;
pub mod profile;
pub mod scores;

pub use game::hooks::{NullHooks, SessionHooks};
pub use game::judgment::{JudgeGrade, Judgment};
pub use game::scoring::ComboReward;
pub use game::session::{self, SessionPhase, SessionState, SessionSummary};
pub use game::timing::{Genre, ALL_GENRES};
pub use network::HttpLeaderboard;
pub use scores::{
    is_new_high_score, Leaderboard, LeaderboardStore, MemoryLeaderboard, SubmitOutcome,
};
