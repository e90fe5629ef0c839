use crate::config::{LANE_COUNT, MAX_LIVE_BEATS, SPAWN_TOLERANCE_MS};
use crate::game::beat::{Beat, BeatStore};
use crate::game::timing;
use log::debug;
use rand::Rng;

/// Decides, once per tick, whether to emit a new beat and into which lane.
/// At most one beat is spawned per tick, so a large clock jump after a frame
/// drop never produces a burst.
#[derive(Clone, Debug)]
pub struct Scheduler {
    beat_interval_ms: f32,
    min_lane_spacing_ms: f32,
    fall_duration_ms: u64,
    last_spawn_ms: Option<u64>,
    lane_last_spawn_ms: [Option<u64>; LANE_COUNT],
    next_beat_id: u64,
}

impl Scheduler {
    pub fn new(bpm: f32) -> Self {
        Self {
            beat_interval_ms: timing::beat_interval_ms(bpm),
            min_lane_spacing_ms: timing::min_lane_spacing_ms(bpm),
            fall_duration_ms: timing::fall_duration_ms(bpm),
            last_spawn_ms: None,
            lane_last_spawn_ms: [None; LANE_COUNT],
            next_beat_id: 0,
        }
    }

    pub fn fall_duration_ms(&self) -> u64 {
        self.fall_duration_ms
    }

    /// Runs one spawn opportunity. Returns the spawned beat, if any.
    pub fn try_spawn(
        &mut self,
        beats: &mut BeatStore,
        elapsed_ms: u64,
        rng: &mut impl Rng,
    ) -> Option<Beat> {
        if beats.len() >= MAX_LIVE_BEATS {
            let dropped = beats.drop_stale(elapsed_ms, self.fall_duration_ms);
            debug!("live-beat cap reached, dropped {} stale beats", dropped);
            if beats.len() >= MAX_LIVE_BEATS {
                return None;
            }
        }

        // The tolerance absorbs frame jitter around the nominal interval.
        let gate_open = match self.last_spawn_ms {
            None => true,
            Some(last) => {
                elapsed_ms.saturating_sub(last) as f32 >= self.beat_interval_ms - SPAWN_TOLERANCE_MS
            }
        };
        if !gate_open {
            return None;
        }

        let eligible: Vec<usize> = (0..LANE_COUNT)
            .filter(|&lane| match self.lane_last_spawn_ms[lane] {
                None => true,
                Some(last) => {
                    elapsed_ms.saturating_sub(last) as f32 >= self.min_lane_spacing_ms
                }
            })
            .collect();

        // Every lane still crowded: skip the opportunity rather than force a
        // stacked beat. The gate stays open, so the next tick retries.
        if eligible.is_empty() {
            return None;
        }

        let lane = eligible[rng.random_range(0..eligible.len())];
        let beat = Beat {
            id: self.next_beat_id,
            lane,
            spawn_time_ms: elapsed_ms,
        };
        self.next_beat_id += 1;
        self.last_spawn_ms = Some(elapsed_ms);
        self.lane_last_spawn_ms[lane] = Some(elapsed_ms);
        beats.push(beat);
        debug!("spawned beat {} in lane {} at {}ms", beat.id, lane, elapsed_ms);
        Some(beat)
    }
}
