//! Coarse trading-hour filter.
//!
//! Unlike [`SessionBindingTable`](crate::session::SessionBindingTable), the
//! filter uses exclusive bounds and supports windows that wrap past midnight.
//! It answers "is this tick inside any session", not "which date is it".

use tickstamp_core::config::TradingHoursConfig;
use tickstamp_core::SessionWindow;

/// Fixed set of session windows shared by all trading days.
#[derive(Debug, Clone)]
pub struct TradingHoursFilter {
    windows: Vec<SessionWindow>,
}

impl TradingHoursFilter {
    pub fn new(windows: Vec<SessionWindow>) -> Self {
        Self { windows }
    }

    pub fn from_config(config: &TradingHoursConfig) -> Self {
        Self::new(config.windows.clone())
    }

    pub fn windows(&self) -> &[SessionWindow] {
        &self.windows
    }

    /// Whether `time` lies strictly inside any window.
    ///
    /// A window with `end < start` matches `time > start || time < end`.
    pub fn in_trading_hour(&self, time: &str) -> bool {
        self.windows
            .iter()
            .any(|window| window.contains_exclusive_wrapping(time))
    }
}

impl Default for TradingHoursFilter {
    fn default() -> Self {
        Self::from_config(&TradingHoursConfig::default())
    }
}
