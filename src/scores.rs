use crate::game::timing::Genre;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::error::Error;

pub const FALLBACK_USERNAME: &str = "Anonymous";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub username: String,
    pub score: u32,
    /// Epoch milliseconds of the write.
    pub updated_at: i64,
}

/// One optional record per genre. Serializes to the wire shape of the
/// leaderboard document: every genre key present, `null` for no record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    pub deep_house: Option<HighScoreEntry>,
    #[serde(default)]
    pub amapiano: Option<HighScoreEntry>,
    #[serde(default)]
    pub afro_house: Option<HighScoreEntry>,
    #[serde(default)]
    pub gqom: Option<HighScoreEntry>,
}

impl Leaderboard {
    pub fn entry(&self, genre: Genre) -> Option<&HighScoreEntry> {
        match genre {
            Genre::DeepHouse => self.deep_house.as_ref(),
            Genre::Amapiano => self.amapiano.as_ref(),
            Genre::AfroHouse => self.afro_house.as_ref(),
            Genre::Gqom => self.gqom.as_ref(),
        }
    }

    fn slot_mut(&mut self, genre: Genre) -> &mut Option<HighScoreEntry> {
        match genre {
            Genre::DeepHouse => &mut self.deep_house,
            Genre::Amapiano => &mut self.amapiano,
            Genre::AfroHouse => &mut self.afro_house,
            Genre::Gqom => &mut self.gqom,
        }
    }
}

/// True when `score` would take the genre's top spot: no record yet, or
/// strictly higher than the existing one.
pub fn is_new_high_score(board: &Leaderboard, genre: Genre, score: u32) -> bool {
    match board.entry(genre) {
        None => true,
        Some(entry) => score > entry.score,
    }
}

pub fn sanitize_username(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        FALLBACK_USERNAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Conditionally writes a record. Returns whether the board changed.
pub fn apply_high_score(
    board: &mut Leaderboard,
    genre: Genre,
    username: &str,
    score: u32,
    updated_at_ms: i64,
) -> bool {
    if !is_new_high_score(board, genre, score) {
        return false;
    }
    *board.slot_mut(genre) = Some(HighScoreEntry {
        username: sanitize_username(username),
        score,
        updated_at: updated_at_ms,
    });
    true
}

/// Result of a submit against a store: the authoritative board afterwards,
/// and whether this submission took the top spot.
#[derive(Clone, Debug)]
pub struct SubmitOutcome {
    pub success: bool,
    pub leaderboard: Leaderboard,
    pub message: Option<String>,
}

pub type StoreError = Box<dyn Error + Send + Sync>;

/// The persistence collaborator. Reads degrade to an empty board so gameplay
/// never depends on leaderboard availability; writes surface their error for
/// a non-fatal notice.
pub trait LeaderboardStore {
    fn load(&self) -> Leaderboard;

    fn submit(&mut self, genre: Genre, username: &str, score: u32)
        -> Result<SubmitOutcome, StoreError>;
}

/// Process-local store. Backs offline play and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryLeaderboard {
    board: Leaderboard,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardStore for MemoryLeaderboard {
    fn load(&self) -> Leaderboard {
        self.board.clone()
    }

    fn submit(
        &mut self,
        genre: Genre,
        username: &str,
        score: u32,
    ) -> Result<SubmitOutcome, StoreError> {
        let success = apply_high_score(
            &mut self.board,
            genre,
            username,
            score,
            Utc::now().timestamp_millis(),
        );
        Ok(SubmitOutcome {
            success,
            leaderboard: self.board.clone(),
            message: (!success).then(|| "Not a high score".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u32) -> Option<HighScoreEntry> {
        Some(HighScoreEntry {
            username: "resident".to_string(),
            score,
            updated_at: 1,
        })
    }

    #[test]
    fn high_score_gate() {
        let mut board = Leaderboard::default();
        assert!(is_new_high_score(&board, Genre::Gqom, 500));

        board.gqom = entry(499);
        assert!(is_new_high_score(&board, Genre::Gqom, 500));

        board.gqom = entry(500);
        assert!(!is_new_high_score(&board, Genre::Gqom, 500));
    }

    #[test]
    fn apply_writes_only_when_the_gate_holds() {
        let mut board = Leaderboard::default();
        assert!(apply_high_score(&mut board, Genre::Amapiano, "  dj khulu  ", 300, 42));
        let written = board.amapiano.as_ref().unwrap();
        assert_eq!(written.username, "dj khulu");
        assert_eq!(written.score, 300);
        assert_eq!(written.updated_at, 42);

        // An equal score does not displace the record.
        assert!(!apply_high_score(&mut board, Genre::Amapiano, "other", 300, 43));
        assert_eq!(board.amapiano.as_ref().unwrap().username, "dj khulu");

        assert!(apply_high_score(&mut board, Genre::Amapiano, "", 301, 44));
        assert_eq!(board.amapiano.as_ref().unwrap().username, FALLBACK_USERNAME);
    }

    #[test]
    fn genres_keep_independent_records() {
        let mut board = Leaderboard::default();
        apply_high_score(&mut board, Genre::DeepHouse, "a", 100, 1);
        apply_high_score(&mut board, Genre::Gqom, "b", 50, 2);
        assert_eq!(board.entry(Genre::DeepHouse).unwrap().score, 100);
        assert_eq!(board.entry(Genre::Gqom).unwrap().score, 50);
        assert!(board.entry(Genre::Amapiano).is_none());
    }

    #[test]
    fn wire_shape_round_trips() {
        let json = r#"{
            "deep_house": {"username": "dj", "score": 1200, "updatedAt": 1700000000000},
            "amapiano": null,
            "afro_house": null,
            "gqom": null
        }"#;
        let board: Leaderboard = serde_json::from_str(json).unwrap();
        assert_eq!(board.entry(Genre::DeepHouse).unwrap().score, 1200);
        assert!(board.entry(Genre::Gqom).is_none());

        let out = serde_json::to_value(&board).unwrap();
        assert_eq!(out["deep_house"]["updatedAt"], 1_700_000_000_000i64);
        // Recordless genres serialize as explicit nulls.
        assert!(out["amapiano"].is_null());
        assert!(out.as_object().unwrap().len() == 4);
    }

    #[test]
    fn missing_keys_default_to_no_record() {
        let board: Leaderboard = serde_json::from_str("{}").unwrap();
        assert_eq!(board, Leaderboard::default());
    }

    #[test]
    fn memory_store_submit_flow() {
        let mut store = MemoryLeaderboard::new();
        let outcome = store.submit(Genre::Gqom, "thandi", 800).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.leaderboard.entry(Genre::Gqom).unwrap().score, 800);

        let outcome = store.submit(Genre::Gqom, "sipho", 700).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Not a high score"));
        assert_eq!(store.load().entry(Genre::Gqom).unwrap().username, "thandi");
    }
}
