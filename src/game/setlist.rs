use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

pub const TRACK_POOL: [&str; 8] = [
    "Twilight Groove in Am",
    "Purple Hour Shuffle",
    "Sunset Boulevard Mix",
    "Golden Beat Theory",
    "Dusk Till Dawn Loop",
    "Orange Sky Rhythm",
    "Silky Smooth Transition",
    "Amber Light Special",
];

pub const SET_DESCRIPTIONS: [&str; 4] = [
    "A smooth journey through golden hour with deep house energy",
    "Sunset vibes meet amapiano rhythm in this special session",
    "From twilight to dusk, this set captures the magic",
    "Perfect blend of smooth transitions and energetic drops",
];

pub const VIBE_LINES: [&str; 5] = [
    "Silky smooth transitions with fire energy",
    "Golden hour vibes all the way through",
    "Pure sunset magic in every beat",
    "Dusk never looked this good",
    "The Yorkie crowd is in love with this set",
];

pub const SETLIST_LEN: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetTrack {
    pub name: &'static str,
    pub position: u32,
}

/// The DJ recap shown after a session: the night's imagined set list plus a
/// one-line description and vibe verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecap {
    pub tracks: Vec<SetTrack>,
    pub set_description: &'static str,
    pub vibe_score: &'static str,
}

pub fn build_recap(rng: &mut StdRng) -> SessionRecap {
    let mut pool = TRACK_POOL;
    pool.shuffle(rng);
    let tracks = pool
        .iter()
        .take(SETLIST_LEN)
        .enumerate()
        .map(|(i, &name)| SetTrack {
            name,
            position: i as u32 + 1,
        })
        .collect();

    SessionRecap {
        tracks,
        set_description: SET_DESCRIPTIONS.choose(rng).copied().unwrap_or(SET_DESCRIPTIONS[0]),
        vibe_score: VIBE_LINES.choose(rng).copied().unwrap_or(VIBE_LINES[0]),
    }
}
