//! Core data types for the tickstamp system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// A trading day: a calendar date without time component.
pub type TradingDay = NaiveDate;

/// Accumulated traded volume.
pub type Volume = u64;

/// Format used for calendar dates everywhere in the pipeline.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| Error::invalid_date(input, e))
}

/// Format a date as `YYYY-MM-DD`.
#[inline]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A time-of-day interval expressed as two `HH:MM:SS.mmm` strings.
///
/// Times are compared as strings, which orders correctly as long as both
/// sides use the same zero-padded layout. `"24:00:00.000"` is a valid end
/// bound and sorts after every real time of day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionWindow {
    /// Start of the window.
    pub start: String,
    /// End of the window.
    pub end: String,
}

impl SessionWindow {
    /// Create a new window.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// `start <= time <= end`. Never wraps past midnight.
    ///
    /// Used for date assignment, where the boundary instants belong to the
    /// window.
    #[inline]
    pub fn contains_inclusive(&self, time: &str) -> bool {
        self.start.as_str() <= time && time <= self.end.as_str()
    }

    /// `start < time < end`, or `time > start || time < end` when the window
    /// wraps past midnight (`end < start`).
    ///
    /// Used for coarse session membership, where the boundary instants are
    /// outside the window.
    #[inline]
    pub fn contains_exclusive_wrapping(&self, time: &str) -> bool {
        if self.wraps_midnight() {
            time > self.start.as_str() || time < self.end.as_str()
        } else {
            time > self.start.as_str() && time < self.end.as_str()
        }
    }

    /// Whether the window ends before it starts.
    #[inline]
    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }
}

impl fmt::Display for SessionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A session window bound to the calendar date its ticks belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBinding {
    /// Time-of-day window.
    pub window: SessionWindow,
    /// Calendar date assigned to times inside the window.
    pub date: NaiveDate,
}

/// Result of resolving a bare time of day against a binding table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTimestamp {
    /// A window matched.
    Resolved { date: NaiveDate, time: String },
    /// No window matched; the time is passed through without a date.
    Unresolved { time: String },
}

impl ResolvedTimestamp {
    /// Whether a date was assigned.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolvedTimestamp::Resolved { .. })
    }

    /// The assigned date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ResolvedTimestamp::Resolved { date, .. } => Some(*date),
            ResolvedTimestamp::Unresolved { .. } => None,
        }
    }

    /// The original time of day.
    pub fn time(&self) -> &str {
        match self {
            ResolvedTimestamp::Resolved { time, .. } | ResolvedTimestamp::Unresolved { time } => {
                time
            }
        }
    }
}

/// Renders the `exchange_timestamp_str` field: `YYYY-MM-DD HH:MM:SS.mmm`,
/// or ` HH:MM:SS.mmm` (empty date) when unresolved.
impl fmt::Display for ResolvedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedTimestamp::Resolved { date, time } => {
                write!(f, "{} {}", date.format(DATE_FORMAT), time)
            }
            ResolvedTimestamp::Unresolved { time } => write!(f, " {}", time),
        }
    }
}

/// One raw tick observation as needed for volume ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTick {
    /// Underlying root symbol (e.g. "cu").
    pub root: String,
    /// Contract identifier (e.g. "cu2501").
    pub instrument: String,
    /// Accumulated traded volume since session start.
    pub volume: Volume,
}

impl RawTick {
    pub fn new(root: impl Into<String>, instrument: impl Into<String>, volume: Volume) -> Self {
        Self {
            root: root.into(),
            instrument: instrument.into(),
            volume,
        }
    }
}

/// Final daily volume and rank of one instrument within its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRankEntry {
    /// Final (maximum) accumulated volume for the day.
    pub volume: Volume,
    /// Zero-based rank; 0 is the most traded instrument of the root.
    pub rank: usize,
}

/// root -> instrument -> rank entry.
///
/// Serializes as the nested JSON object persisted per trading day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeRankTable(BTreeMap<String, BTreeMap<String, VolumeRankEntry>>);

impl VolumeRankTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one entry.
    pub fn insert(&mut self, root: &str, instrument: &str, entry: VolumeRankEntry) {
        self.0
            .entry(root.to_string())
            .or_default()
            .insert(instrument.to_string(), entry);
    }

    /// Look up one instrument.
    pub fn get(&self, root: &str, instrument: &str) -> Option<&VolumeRankEntry> {
        self.0.get(root)?.get(instrument)
    }

    /// All instruments of one root.
    pub fn root(&self, root: &str) -> Option<&BTreeMap<String, VolumeRankEntry>> {
        self.0.get(root)
    }

    /// Iterate over root symbols in sorted order.
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of roots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Instruments of `root` with rank below `n`, ordered by rank.
    pub fn top_instruments(&self, root: &str, n: usize) -> Vec<&str> {
        let Some(instruments) = self.0.get(root) else {
            return Vec::new();
        };
        let mut ranked: Vec<(&str, usize)> = instruments
            .iter()
            .filter(|(_, e)| e.rank < n)
            .map(|(id, e)| (id.as_str(), e.rank))
            .collect();
        ranked.sort_by_key(|&(_, rank)| rank);
        ranked.into_iter().map(|(id, _)| id).collect()
    }

    /// The rank-0 instrument of `root`.
    pub fn dominant(&self, root: &str) -> Option<&str> {
        self.top_instruments(root, 1).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_and_format_date() {
        let date = parse_date("2025-01-08").unwrap();
        assert_eq!(date, d(2025, 1, 8));
        assert_eq!(format_date(date), "2025-01-08");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("2025/01/08").unwrap_err();
        assert!(matches!(err, Error::InvalidDate { .. }));
        assert!(err.to_string().contains("2025/01/08"));
    }

    #[test]
    fn test_inclusive_window_boundaries() {
        let w = SessionWindow::new("08:00:00.000", "17:00:00.000");
        assert!(w.contains_inclusive("08:00:00.000"));
        assert!(w.contains_inclusive("17:00:00.000"));
        assert!(w.contains_inclusive("12:30:15.250"));
        assert!(!w.contains_inclusive("07:59:59.999"));
        assert!(!w.contains_inclusive("17:00:00.001"));
    }

    #[test]
    fn test_inclusive_window_accepts_24_end() {
        let w = SessionWindow::new("20:00:00.000", "24:00:00.000");
        assert!(w.contains_inclusive("23:59:59.999"));
        assert!(!w.contains_inclusive("00:00:00.000"));
    }

    #[test]
    fn test_exclusive_window_boundaries() {
        let w = SessionWindow::new("08:58:59", "11:30:01");
        assert!(!w.contains_exclusive_wrapping("08:58:59"));
        assert!(!w.contains_exclusive_wrapping("11:30:01"));
        assert!(w.contains_exclusive_wrapping("09:00:00"));
    }

    #[test]
    fn test_exclusive_window_wraps_midnight() {
        let w = SessionWindow::new("20:58:59", "02:30:01");
        assert!(w.wraps_midnight());
        assert!(w.contains_exclusive_wrapping("21:00:00"));
        assert!(w.contains_exclusive_wrapping("00:15:00"));
        assert!(w.contains_exclusive_wrapping("02:30:00"));
        assert!(!w.contains_exclusive_wrapping("20:58:59"));
        assert!(!w.contains_exclusive_wrapping("02:30:01"));
        assert!(!w.contains_exclusive_wrapping("12:00:00"));
    }

    #[test]
    fn test_resolved_timestamp_display() {
        let resolved = ResolvedTimestamp::Resolved {
            date: d(2025, 1, 7),
            time: "21:00:00.000".to_string(),
        };
        assert_eq!(resolved.to_string(), "2025-01-07 21:00:00.000");
        assert_eq!(resolved.date(), Some(d(2025, 1, 7)));

        let unresolved = ResolvedTimestamp::Unresolved {
            time: "05:00:00.000".to_string(),
        };
        assert!(!unresolved.is_resolved());
        assert_eq!(unresolved.to_string(), " 05:00:00.000");
        assert_eq!(unresolved.time(), "05:00:00.000");
    }

    #[test]
    fn test_rank_table_top_instruments() {
        let mut table = VolumeRankTable::new();
        table.insert("cu", "cu2501", VolumeRankEntry { volume: 500, rank: 1 });
        table.insert("cu", "cu2502", VolumeRankEntry { volume: 900, rank: 0 });
        table.insert("cu", "cu2503", VolumeRankEntry { volume: 10, rank: 2 });

        assert_eq!(table.top_instruments("cu", 2), vec!["cu2502", "cu2501"]);
        assert_eq!(table.dominant("cu"), Some("cu2502"));
        assert!(table.top_instruments("al", 2).is_empty());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rank_table_json_shape() {
        let mut table = VolumeRankTable::new();
        table.insert("cu", "cu2502", VolumeRankEntry { volume: 900, rank: 0 });

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"cu":{"cu2502":{"volume":900,"rank":0}}}"#);

        let back: VolumeRankTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
