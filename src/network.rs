use crate::game::timing::Genre;
use crate::scores::{Leaderboard, LeaderboardStore, StoreError, SubmitOutcome};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const LEADERBOARD_PATH: &str = "/api/leaderboard";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Exposes the globally configured ureq Agent for leaderboard requests.
pub fn get_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build()
        .into()
}

/// Leaderboard store backed by the HTTP document service. Reads fall back to
/// the empty board; the play session never waits on or fails with this.
pub struct HttpLeaderboard {
    agent: ureq::Agent,
    base_url: String,
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    genre: Genre,
    username: &'a str,
    score: u32,
}

#[derive(Deserialize)]
struct SubmitResponse {
    success: bool,
    leaderboard: Option<Leaderboard>,
    message: Option<String>,
}

impl HttpLeaderboard {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            agent: get_agent(),
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, LEADERBOARD_PATH)
    }
}

impl LeaderboardStore for HttpLeaderboard {
    fn load(&self) -> Leaderboard {
        match self.agent.get(&self.endpoint()).call() {
            Ok(response) => {
                if response.status() != 200 {
                    warn!("leaderboard read returned status {}", response.status());
                    return Leaderboard::default();
                }
                match response.into_body().read_json::<Leaderboard>() {
                    Ok(board) => board,
                    Err(e) => {
                        warn!("failed to parse leaderboard response: {}", e);
                        Leaderboard::default()
                    }
                }
            }
            Err(e) => {
                warn!("leaderboard read failed: {}", e);
                Leaderboard::default()
            }
        }
    }

    fn submit(
        &mut self,
        genre: Genre,
        username: &str,
        score: u32,
    ) -> Result<SubmitOutcome, StoreError> {
        info!(
            "submitting {} for '{}' in {}",
            score,
            username,
            genre.as_str()
        );
        let response = self.agent.post(&self.endpoint()).send_json(SubmitBody {
            genre,
            username,
            score,
        })?;

        if response.status() != 200 {
            return Err(format!("leaderboard write returned status {}", response.status()).into());
        }

        let parsed: SubmitResponse = response.into_body().read_json()?;
        Ok(SubmitOutcome {
            success: parsed.success,
            leaderboard: parsed.leaderboard.unwrap_or_default(),
            message: parsed.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slashes_are_stripped() {
        let store = HttpLeaderboard::new("http://localhost:3001///");
        assert_eq!(store.endpoint(), "http://localhost:3001/api/leaderboard");
    }

    #[test]
    fn submit_body_matches_the_wire_shape() {
        let body = SubmitBody {
            genre: Genre::AfroHouse,
            username: "thandi",
            score: 640,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["genre"], "afro_house");
        assert_eq!(json["username"], "thandi");
        assert_eq!(json["score"], 640);
    }
}
