//! Tick normalization for the tickstamp system.
//!
//! This crate handles:
//! - Session-to-date resolution of bare tick times
//! - Coarse trading-hour filtering
//! - Batch timestamp stamping with quality statistics
//! - Per-root volume ranking

pub mod session;
pub mod trading_hours;
pub mod stamper;
pub mod volume_rank;

pub use session::{resolve_timestamp, session_bindings, SessionBindingTable};
pub use trading_hours::TradingHoursFilter;
pub use stamper::{StampStats, TimestampStamper};
pub use volume_rank::{rank_volumes, VolumeRanker, VolumeRegression};
