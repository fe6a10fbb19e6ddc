//! Trading-day calendar for the tickstamp system.
//!
//! This crate handles:
//! - Loading the holiday document
//! - Caching it by file modification time
//! - Enumerating trading days (weekdays minus holidays)

pub mod holiday;
pub mod cache;
pub mod service;

pub use holiday::HolidayCalendar;
pub use cache::HolidayCache;
pub use service::{trading_days_between, TradingCalendarService};
