//! Stamping raw tick times with calendar dates.
//!
//! Wraps one day's [`SessionBindingTable`] and keeps track of how many ticks
//! could not be assigned a date, so a batch job can flag a late or malformed
//! feed instead of silently persisting date-less timestamps.

use chrono::NaiveDate;
use tickstamp_core::config::SessionConfig;
use tickstamp_core::ResolvedTimestamp;
use tracing::{debug, warn};

use crate::session::SessionBindingTable;

/// Statistics about timestamp resolution quality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StampStats {
    /// Total times processed.
    pub total: u64,
    /// Times assigned a date.
    pub resolved: u64,
    /// Times no window matched.
    pub unresolved: u64,
}

impl StampStats {
    /// Fraction of times left unresolved.
    pub fn unresolved_frac(&self) -> f64 {
        if self.total > 0 {
            self.unresolved as f64 / self.total as f64
        } else {
            0.0
        }
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Resolves the tick times of one trading day.
pub struct TimestampStamper {
    bindings: SessionBindingTable,
    stats: StampStats,
}

impl TimestampStamper {
    /// Create a stamper for `reference_date`.
    pub fn new(reference_date: NaiveDate, config: &SessionConfig) -> Self {
        Self::from_bindings(SessionBindingTable::build(reference_date, config))
    }

    /// Create a stamper over an already built table.
    pub fn from_bindings(bindings: SessionBindingTable) -> Self {
        Self {
            bindings,
            stats: StampStats::default(),
        }
    }

    /// The binding table in use.
    pub fn bindings(&self) -> &SessionBindingTable {
        &self.bindings
    }

    /// Resolve one time of day.
    pub fn stamp(&mut self, time: &str) -> ResolvedTimestamp {
        let resolved = self.bindings.resolve(time);
        self.stats.total += 1;
        if resolved.is_resolved() {
            self.stats.resolved += 1;
        } else {
            self.stats.unresolved += 1;
            warn!(
                reference_date = %self.bindings.reference_date(),
                time,
                "tick time outside every session window"
            );
        }
        resolved
    }

    /// Resolve a batch of times, in order.
    pub fn stamp_all<'a, I>(&mut self, times: I) -> Vec<ResolvedTimestamp>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let out: Vec<ResolvedTimestamp> = times.into_iter().map(|t| self.stamp(t)).collect();
        debug!(
            reference_date = %self.bindings.reference_date(),
            stamped = out.len(),
            unresolved = self.stats.unresolved,
            "stamped batch"
        );
        out
    }

    /// Get resolution statistics.
    pub fn stats(&self) -> &StampStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}
