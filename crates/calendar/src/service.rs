//! Trading-day enumeration.

use chrono::{Datelike, NaiveDate, Weekday};
use std::path::PathBuf;
use std::sync::Arc;
use tickstamp_core::config::CalendarConfig;
use tickstamp_core::{format_date, parse_date, Result, TradingDay};
use tracing::debug;

use crate::cache::HolidayCache;
use crate::holiday::HolidayCalendar;

/// Monday through Friday.
#[inline]
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Weekdays in `[start, end]` that are not holidays, ascending.
///
/// Empty when `start > end`.
pub fn trading_days_between(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HolidayCalendar,
) -> Vec<TradingDay> {
    if start > end {
        return Vec::new();
    }
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_weekday(*day) && !holidays.contains(*day))
        .collect()
}

/// Where the service gets its holidays from.
#[derive(Debug)]
enum HolidaySource {
    /// Read the document on every query.
    File(PathBuf),
    /// Read the document when its modification time changes.
    Cached(HolidayCache),
    /// A calendar supplied in memory.
    Fixed(Arc<HolidayCalendar>),
}

/// Produces trading days for date ranges.
///
/// Holiday document failures are returned as-is; nothing is retried.
#[derive(Debug)]
pub struct TradingCalendarService {
    source: HolidaySource,
}

impl TradingCalendarService {
    /// Create a service that re-reads `path` on every query.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: HolidaySource::File(path.into()),
        }
    }

    /// Create a service that caches `path` by modification time.
    pub fn cached(path: impl Into<PathBuf>) -> Self {
        Self {
            source: HolidaySource::Cached(HolidayCache::new(path)),
        }
    }

    /// Create a service over an in-memory calendar.
    pub fn with_calendar(calendar: HolidayCalendar) -> Self {
        Self {
            source: HolidaySource::Fixed(Arc::new(calendar)),
        }
    }

    /// Create a service from configuration.
    pub fn from_config(config: &CalendarConfig) -> Self {
        if config.cache_by_mtime {
            Self::cached(config.holiday_path.clone())
        } else {
            Self::from_path(config.holiday_path.clone())
        }
    }

    /// The holiday calendar used for the next query.
    pub fn holidays(&self) -> Result<Arc<HolidayCalendar>> {
        match &self.source {
            HolidaySource::File(path) => Ok(Arc::new(HolidayCalendar::load(path)?)),
            HolidaySource::Cached(cache) => cache.get(),
            HolidaySource::Fixed(calendar) => Ok(Arc::clone(calendar)),
        }
    }

    /// Trading days in `[start, end]`, ascending.
    ///
    /// The holiday document is loaded even for an empty range, so a missing
    /// document is always reported.
    pub fn trading_days(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<TradingDay>> {
        let holidays = self.holidays()?;
        let days = trading_days_between(start, end, &holidays);
        debug!(%start, %end, count = days.len(), "enumerated trading days");
        Ok(days)
    }

    /// `trading_days` over `YYYY-MM-DD` strings.
    pub fn trading_day_strings(&self, start: &str, end: &str) -> Result<Vec<String>> {
        let days = self.trading_days(parse_date(start)?, parse_date(end)?)?;
        Ok(days.into_iter().map(format_date).collect())
    }

    /// Whether `date` is a weekday and not a holiday.
    pub fn is_trading_day(&self, date: NaiveDate) -> Result<bool> {
        Ok(is_weekday(date) && !self.holidays()?.contains(date))
    }
}
