use serde::{Deserialize, Serialize};

/// The four playable genres. The wire name (snake_case) doubles as the
/// leaderboard key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    DeepHouse,
    Amapiano,
    AfroHouse,
    Gqom,
}

pub const ALL_GENRES: [Genre; 4] = [
    Genre::DeepHouse,
    Genre::Amapiano,
    Genre::AfroHouse,
    Genre::Gqom,
];

impl Genre {
    pub fn bpm(self) -> f32 {
        match self {
            Genre::DeepHouse => 120.0,
            Genre::Amapiano => 115.0,
            Genre::AfroHouse => 122.0,
            Genre::Gqom => 140.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::DeepHouse => "deep_house",
            Genre::Amapiano => "amapiano",
            Genre::AfroHouse => "afro_house",
            Genre::Gqom => "gqom",
        }
    }
}

pub fn beat_interval_ms(bpm: f32) -> f32 {
    60_000.0 / bpm
}

/// Fall duration scales inversely with tempo: faster genres give shorter
/// reaction windows.
pub fn fall_duration_ms(bpm: f32) -> u64 {
    ((100.0 / bpm) * 2500.0).round() as u64
}

/// Minimum spacing between two beats in the same lane, so beats never stack
/// visually or temporally.
pub fn min_lane_spacing_ms(bpm: f32) -> f32 {
    (beat_interval_ms(bpm) * 0.9).max(fall_duration_ms(bpm) as f32 * 0.65)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fall_duration_follows_tempo() {
        assert_eq!(fall_duration_ms(Genre::Gqom.bpm()), 1786);
        assert_eq!(fall_duration_ms(Genre::DeepHouse.bpm()), 2083);
        assert_eq!(fall_duration_ms(100.0), 2500);
    }

    #[test]
    fn lane_spacing_takes_the_larger_bound() {
        // At 120 BPM the fall-duration bound dominates the interval bound.
        let bpm = Genre::DeepHouse.bpm();
        let spacing = min_lane_spacing_ms(bpm);
        assert!(spacing > beat_interval_ms(bpm) * 0.9);
        assert!((spacing - 2083.0 * 0.65).abs() < 0.5);
    }

    #[test]
    fn wire_names_round_trip() {
        for genre in ALL_GENRES {
            let json = serde_json::to_string(&genre).unwrap();
            assert_eq!(json, format!("\"{}\"", genre.as_str()));
            let back: Genre = serde_json::from_str(&json).unwrap();
            assert_eq!(back, genre);
        }
    }
}
