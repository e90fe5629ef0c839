use crate::game::judgment::JudgeGrade;
use crate::game::scoring::ComboReward;
use crate::game::session::SessionSummary;

/// Cosmetic side effects of gameplay: sounds, reactions, commentary, the
/// end-of-session flow. The engine only ever calls through this seam and
/// never reaches into host audio or visual state.
///
/// Implementations must not retain references to session internals; every
/// call hands them finished values.
pub trait SessionHooks {
    fn on_hit(&mut self, _lane: usize, _grade: JudgeGrade, _accuracy_percent: f32) {}

    fn on_miss(&mut self, _lane: usize) {}

    fn on_combo_reward(&mut self, _reward: &ComboReward) {}

    fn on_commentary(&mut self, _line: &'static str) {}

    fn on_session_end(&mut self, _summary: &SessionSummary) {}
}

/// Hook sink that ignores everything. Useful for headless runs and tests.
pub struct NullHooks;

impl SessionHooks for NullHooks {}
