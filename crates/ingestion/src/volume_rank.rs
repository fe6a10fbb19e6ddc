//! Per-root volume ranking.
//!
//! Each tick carries the accumulated volume of its instrument, so the final
//! daily volume is the largest value observed. Within a root, instruments are
//! ranked by that volume (rank 0 = most traded); equal volumes keep the order
//! in which the instruments first appeared in the input.

use std::collections::{BTreeMap, HashMap};
use tickstamp_core::{RawTick, Volume, VolumeRankEntry, VolumeRankTable};
use tracing::{debug, warn};

/// An accumulated-volume counter that went backwards.
///
/// The final volume still uses the maximum; this only records the anomaly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeRegression {
    pub root: String,
    pub instrument: String,
    /// Last accumulated volume seen before the drop.
    pub previous: Volume,
    /// The lower value that followed.
    pub current: Volume,
}

#[derive(Debug, Clone)]
struct InstrumentVolume {
    instrument: String,
    max: Volume,
    last: Volume,
}

/// Instruments of one root in first-seen order.
#[derive(Debug, Clone, Default)]
struct RootVolumes {
    instruments: Vec<InstrumentVolume>,
    index: HashMap<String, usize>,
}

/// Incremental volume ranker for one trading day.
#[derive(Debug, Clone, Default)]
pub struct VolumeRanker {
    roots: BTreeMap<String, RootVolumes>,
    regressions: Vec<VolumeRegression>,
    tick_count: u64,
}

impl VolumeRanker {
    /// Create an empty ranker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one tick.
    pub fn add_tick(&mut self, tick: &RawTick) {
        self.tick_count += 1;

        let root = self.roots.entry(tick.root.clone()).or_default();
        match root.index.get(&tick.instrument) {
            Some(&i) => {
                let entry = &mut root.instruments[i];
                if tick.volume < entry.last {
                    warn!(
                        root = %tick.root,
                        instrument = %tick.instrument,
                        previous = entry.last,
                        current = tick.volume,
                        "accumulated volume decreased"
                    );
                    self.regressions.push(VolumeRegression {
                        root: tick.root.clone(),
                        instrument: tick.instrument.clone(),
                        previous: entry.last,
                        current: tick.volume,
                    });
                }
                entry.max = entry.max.max(tick.volume);
                entry.last = tick.volume;
            }
            None => {
                root.index
                    .insert(tick.instrument.clone(), root.instruments.len());
                root.instruments.push(InstrumentVolume {
                    instrument: tick.instrument.clone(),
                    max: tick.volume,
                    last: tick.volume,
                });
            }
        }
    }

    /// Add multiple ticks, in order.
    pub fn add_ticks<'a, I>(&mut self, ticks: I)
    where
        I: IntoIterator<Item = &'a RawTick>,
    {
        for tick in ticks {
            self.add_tick(tick);
        }
    }

    /// Rank everything seen so far.
    pub fn rank(&self) -> VolumeRankTable {
        let mut table = VolumeRankTable::new();

        for (root, volumes) in &self.roots {
            let mut ordered: Vec<&InstrumentVolume> = volumes.instruments.iter().collect();
            // Stable sort: ties stay in first-seen order.
            ordered.sort_by(|a, b| b.max.cmp(&a.max));

            for (rank, entry) in ordered.into_iter().enumerate() {
                table.insert(
                    root,
                    &entry.instrument,
                    VolumeRankEntry {
                        volume: entry.max,
                        rank,
                    },
                );
            }
        }

        debug!(
            ticks = self.tick_count,
            roots = table.len(),
            regressions = self.regressions.len(),
            "ranked volumes"
        );
        table
    }

    /// Accumulated-volume decreases seen so far.
    pub fn regressions(&self) -> &[VolumeRegression] {
        &self.regressions
    }

    /// Number of ticks added.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clear all state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Rank one day's ticks.
pub fn rank_volumes<'a, I>(ticks: I) -> VolumeRankTable
where
    I: IntoIterator<Item = &'a RawTick>,
{
    let mut ranker = VolumeRanker::new();
    ranker.add_ticks(ticks);
    ranker.rank()
}
