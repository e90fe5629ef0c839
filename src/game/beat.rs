use crate::config::{BEAT_LIFETIME_MS, LANE_COUNT, MAX_LIVE_BEATS};

/// One fallable note. Never mutated after creation; it is consumed by a
/// successful hit or removed by expiry pruning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Beat {
    pub id: u64,
    pub lane: usize,
    pub spawn_time_ms: u64,
}

impl Beat {
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.spawn_time_ms)
    }
}

/// Live beats, kept per lane. Ids increase in creation order.
#[derive(Clone, Debug, Default)]
pub struct BeatStore {
    lanes: [Vec<Beat>; LANE_COUNT],
}

impl BeatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        for lane in &mut self.lanes {
            lane.clear();
        }
    }

    pub fn push(&mut self, beat: Beat) {
        self.lanes[beat.lane].push(beat);
    }

    pub fn len(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(Vec::is_empty)
    }

    pub fn lane(&self, lane: usize) -> &[Beat] {
        &self.lanes[lane]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Beat> {
        self.lanes.iter().flatten()
    }

    pub fn remove(&mut self, lane: usize, id: u64) -> Option<Beat> {
        let idx = self.lanes[lane].iter().position(|b| b.id == id)?;
        Some(self.lanes[lane].remove(idx))
    }

    /// Drops every beat that has aged past its lifetime. Returns the number
    /// removed.
    pub fn prune_expired(&mut self, now_ms: u64) -> usize {
        let before = self.len();
        for lane in &mut self.lanes {
            lane.retain(|b| b.age_ms(now_ms) < BEAT_LIFETIME_MS);
        }
        before - self.len()
    }

    /// Back-pressure relief: while the store sits at or above the live-beat
    /// cap, drop the oldest beats that have already fallen past `floor_ms`.
    /// Beats younger than the floor are never dropped here.
    pub fn drop_stale(&mut self, now_ms: u64, floor_ms: u64) -> usize {
        let mut dropped = 0;
        while self.len() >= MAX_LIVE_BEATS {
            let oldest = self
                .iter()
                .filter(|b| b.age_ms(now_ms) > floor_ms)
                .min_by_key(|b| (b.spawn_time_ms, b.id))
                .copied();
            match oldest {
                Some(beat) => {
                    self.remove(beat.lane, beat.id);
                    dropped += 1;
                }
                None => break,
            }
        }
        dropped
    }
}
