//! Session-to-date resolution.
//!
//! Exchange feeds stamp ticks with a bare `HH:MM:SS.mmm`. The calendar date
//! depends on which session the tick belongs to: night-session ticks before
//! midnight belong to the previous evening, and Monday's night session is the
//! continuation of Friday's.
//!
//! A [`SessionBindingTable`] is built for one reference date (the trading day
//! being processed) and then resolves every tick of that day.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tickstamp_core::config::SessionConfig;
use tickstamp_core::{ResolvedTimestamp, SessionBinding, SessionWindow};

/// Ordered (window, date) bindings for one reference date.
///
/// Lookup is a first-match linear scan in build order, so the order of
/// `bindings` decides which window wins when two share a boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBindingTable {
    reference_date: NaiveDate,
    bindings: Vec<SessionBinding>,
}

impl SessionBindingTable {
    /// Build the table for `reference_date` using the given window layout.
    ///
    /// - Day session is always bound to `reference_date`.
    /// - Tuesday to Friday: pre-midnight -> previous day, post-midnight -> `reference_date`.
    /// - Monday: pre-midnight -> Friday (3 days back), post-midnight -> Saturday (2 days back).
    /// - Weekend: day session only.
    ///
    /// A night binding whose date would fall before `NaiveDate::MIN` is left out.
    pub fn build(reference_date: NaiveDate, config: &SessionConfig) -> Self {
        let mut table = Self {
            reference_date,
            bindings: Vec::with_capacity(3),
        };
        table.push(&config.day, reference_date);

        match reference_date.weekday() {
            Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
                table.push_days_back(&config.pre_midnight, 1);
                table.push(&config.post_midnight, reference_date);
            }
            Weekday::Mon => {
                table.push_days_back(&config.pre_midnight, 3);
                table.push_days_back(&config.post_midnight, 2);
            }
            Weekday::Sat | Weekday::Sun => {}
        }

        table
    }

    fn push(&mut self, window: &SessionWindow, date: NaiveDate) {
        self.bindings.push(SessionBinding {
            window: window.clone(),
            date,
        });
    }

    fn push_days_back(&mut self, window: &SessionWindow, days: u64) {
        if let Some(date) = self.reference_date.checked_sub_days(Days::new(days)) {
            self.push(window, date);
        }
    }

    /// The date this table was built for.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Bindings in lookup order.
    pub fn bindings(&self) -> &[SessionBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The first binding whose window contains `time` (bounds inclusive).
    pub fn find(&self, time: &str) -> Option<&SessionBinding> {
        self.bindings
            .iter()
            .find(|binding| binding.window.contains_inclusive(time))
    }

    /// Attach a calendar date to `time`.
    pub fn resolve(&self, time: &str) -> ResolvedTimestamp {
        match self.find(time) {
            Some(binding) => ResolvedTimestamp::Resolved {
                date: binding.date,
                time: time.to_string(),
            },
            None => ResolvedTimestamp::Unresolved {
                time: time.to_string(),
            },
        }
    }
}

/// Binding table for `reference_date` with the default session layout.
pub fn session_bindings(reference_date: NaiveDate) -> SessionBindingTable {
    SessionBindingTable::build(reference_date, &SessionConfig::default())
}

/// Resolve `time` against `bindings`.
pub fn resolve_timestamp(bindings: &SessionBindingTable, time: &str) -> ResolvedTimestamp {
    bindings.resolve(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // 2025-01-06 is a Monday.
    const MONDAY: (i32, u32, u32) = (2025, 1, 6);
    const WEDNESDAY: (i32, u32, u32) = (2025, 1, 8);

    fn table(date: (i32, u32, u32)) -> SessionBindingTable {
        session_bindings(d(date.0, date.1, date.2))
    }

    #[test]
    fn test_wednesday_bindings() {
        let t = table(WEDNESDAY);
        let b = t.bindings();
        assert_eq!(b.len(), 3);

        assert_eq!(b[0].window, SessionWindow::new("08:00:00.000", "17:00:00.000"));
        assert_eq!(b[0].date, d(2025, 1, 8));

        assert_eq!(b[1].window, SessionWindow::new("20:00:00.000", "24:00:00.000"));
        assert_eq!(b[1].date, d(2025, 1, 7));

        assert_eq!(b[2].window, SessionWindow::new("00:00:00.000", "03:00:00.000"));
        assert_eq!(b[2].date, d(2025, 1, 8));
    }

    #[test]
    fn test_monday_bindings() {
        let t = table(MONDAY);
        let b = t.bindings();
        assert_eq!(b.len(), 3);
        assert_eq!(b[0].date, d(2025, 1, 6));
        // Friday
        assert_eq!(b[1].date, d(2025, 1, 3));
        // Saturday
        assert_eq!(b[2].date, d(2025, 1, 4));
    }

    #[test]
    fn test_weekend_has_day_session_only() {
        for date in [d(2025, 1, 4), d(2025, 1, 5)] {
            let t = session_bindings(date);
            assert_eq!(t.len(), 1);
            assert_eq!(t.bindings()[0].date, date);
        }
    }

    #[test]
    fn test_tuesday_and_friday_bind_previous_day() {
        let tue = session_bindings(d(2025, 1, 7));
        assert_eq!(tue.bindings()[1].date, d(2025, 1, 6));
        let fri = session_bindings(d(2025, 1, 10));
        assert_eq!(fri.bindings()[1].date, d(2025, 1, 9));
        assert_eq!(fri.bindings()[2].date, d(2025, 1, 10));
    }

    #[test]
    fn test_previous_day_crosses_month() {
        let t = session_bindings(d(2025, 3, 4));
        assert_eq!(t.bindings()[1].date, d(2025, 3, 3));
        let t = session_bindings(d(2025, 3, 3)); // Monday
        assert_eq!(t.bindings()[1].date, d(2025, 2, 28));
        assert_eq!(t.bindings()[2].date, d(2025, 3, 1));
    }

    #[test]
    fn test_resolve_night_tick_on_wednesday() {
        let t = table(WEDNESDAY);
        let resolved = resolve_timestamp(&t, "21:00:00.000");
        assert_eq!(resolved.to_string(), "2025-01-07 21:00:00.000");
    }

    #[test]
    fn test_resolve_day_and_post_midnight() {
        let t = table(WEDNESDAY);
        assert_eq!(t.resolve("09:15:30.500").to_string(), "2025-01-08 09:15:30.500");
        assert_eq!(t.resolve("01:00:00.000").to_string(), "2025-01-08 01:00:00.000");
    }

    #[test]
    fn test_resolve_monday_night_session() {
        let t = table(MONDAY);
        assert_eq!(t.resolve("22:30:00.000").to_string(), "2025-01-03 22:30:00.000");
        assert_eq!(t.resolve("02:00:00.000").to_string(), "2025-01-04 02:00:00.000");
        assert_eq!(t.resolve("10:00:00.000").to_string(), "2025-01-06 10:00:00.000");
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let t = table(WEDNESDAY);
        assert_eq!(t.resolve("08:00:00.000").date(), Some(d(2025, 1, 8)));
        assert_eq!(t.resolve("17:00:00.000").date(), Some(d(2025, 1, 8)));
        assert_eq!(t.resolve("20:00:00.000").date(), Some(d(2025, 1, 7)));
        assert_eq!(t.resolve("00:00:00.000").date(), Some(d(2025, 1, 8)));
        assert_eq!(t.resolve("03:00:00.000").date(), Some(d(2025, 1, 8)));
    }

    #[test]
    fn test_unmatched_time_is_unresolved() {
        let t = table(WEDNESDAY);
        let resolved = resolve_timestamp(&t, "05:00:00.000");
        assert!(!resolved.is_resolved());
        assert_eq!(resolved.time(), "05:00:00.000");
        assert_eq!(resolved.to_string(), " 05:00:00.000");
    }

    #[test]
    fn test_weekend_night_tick_is_unresolved() {
        let t = session_bindings(d(2025, 1, 4));
        assert!(!t.resolve("21:00:00.000").is_resolved());
    }

    #[test]
    fn test_first_match_wins_on_shared_boundary() {
        let config = SessionConfig {
            day: SessionWindow::new("08:00:00.000", "20:00:00.000"),
            ..SessionConfig::default()
        };
        let t = SessionBindingTable::build(d(2025, 1, 8), &config);
        // "20:00:00.000" is in both the day and the pre-midnight window.
        assert_eq!(t.resolve("20:00:00.000").date(), Some(d(2025, 1, 8)));
        assert_eq!(t.resolve("20:00:00.001").date(), Some(d(2025, 1, 7)));
    }

    #[test]
    fn test_build_at_earliest_date_does_not_underflow() {
        // Every weekday branch near the lower bound.
        for date in NaiveDate::MIN.iter_days().take(7) {
            let t = session_bindings(date);
            assert_eq!(t.bindings()[0].date, date);
            assert!(t.bindings().iter().all(|b| b.date >= NaiveDate::MIN));
        }
        let t = session_bindings(NaiveDate::MIN);
        assert_eq!(t.resolve("10:00:00.000").date(), Some(NaiveDate::MIN));
    }
}
