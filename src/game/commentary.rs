use crate::config::COMMENTARY_INTERVAL_MS;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

pub const HYPE_COMMENTS: [&str; 10] = [
    "That transition was BUTTER! 🔥",
    "Smooth as silk! Keep it going!",
    "The Yorkie approves! 🐕",
    "Now we're vibing! ✨",
    "Ooh that combo though! 💜",
    "Golden hour energy! ☀️",
    "Dusk never sounded this good! 🌅",
    "Keep those beats flowing! 🎵",
    "The crowd is feeling it! 🎶",
    "Pure deep house magic! ⭐",
];

/// Emits one random hype line every ten seconds of session time.
#[derive(Clone, Debug, Default)]
pub struct CommentaryState {
    last_comment_at_ms: u64,
}

impl CommentaryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, elapsed_ms: u64, rng: &mut StdRng) -> Option<&'static str> {
        if elapsed_ms.saturating_sub(self.last_comment_at_ms) <= COMMENTARY_INTERVAL_MS {
            return None;
        }
        self.last_comment_at_ms = elapsed_ms;
        HYPE_COMMENTS.choose(rng).copied()
    }
}
