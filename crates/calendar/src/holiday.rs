//! Holiday calendar document.
//!
//! The document is a JSON object whose `HOLIDAY` field lists ISO dates:
//!
//! ```json
//! {"HOLIDAY": ["2025-01-01", "2025-01-28"]}
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use tickstamp_core::Result;
use tracing::debug;

/// On-disk shape of the holiday document.
#[derive(Debug, Deserialize)]
struct HolidayDocument {
    #[serde(rename = "HOLIDAY")]
    holiday: Vec<NaiveDate>,
}

/// An immutable set of exchange holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Build a calendar from explicit dates.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Parse a holiday document.
    ///
    /// A missing `HOLIDAY` field or a non-ISO entry is a JSON error.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let doc: HolidayDocument = serde_json::from_str(raw)?;
        Ok(Self::from_dates(doc.holiday))
    }

    /// Read and parse a holiday document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let calendar = Self::from_json_str(&raw)?;
        debug!(path = %path.display(), holidays = calendar.len(), "loaded holiday calendar");
        Ok(calendar)
    }

    /// Whether `date` is a holiday.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Number of holidays.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tickstamp_core::Error;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_document() {
        let cal = HolidayCalendar::from_json_str(r#"{"HOLIDAY": ["2025-01-01", "2025-01-28"]}"#)
            .unwrap();
        assert_eq!(cal.len(), 2);
        assert!(cal.contains(d(2025, 1, 1)));
        assert!(cal.contains(d(2025, 1, 28)));
        assert!(!cal.contains(d(2025, 1, 2)));
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let cal = HolidayCalendar::from_json_str(r#"{"HOLIDAY": ["2025-01-01", "2025-01-01"]}"#)
            .unwrap();
        assert_eq!(cal.len(), 1);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let cal = HolidayCalendar::from_json_str(
            r#"{"HOLIDAY": ["2025-05-01"], "WORKDAY": ["2025-04-27"]}"#,
        )
        .unwrap();
        assert_eq!(cal.iter().collect::<Vec<_>>(), vec![d(2025, 5, 1)]);
    }

    #[test]
    fn test_missing_field_is_error() {
        let err = HolidayCalendar::from_json_str(r#"{"holidays": []}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_bad_date_is_error() {
        let err = HolidayCalendar::from_json_str(r#"{"HOLIDAY": ["01/01/2025"]}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = HolidayCalendar::load(dir.path().join("absent.json")).unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"HOLIDAY": ["2025-10-01"]}}"#).unwrap();
        let cal = HolidayCalendar::load(file.path()).unwrap();
        assert!(cal.contains(d(2025, 10, 1)));
    }
}
