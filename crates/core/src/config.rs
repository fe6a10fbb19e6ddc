//! Configuration structures for the tickstamp system.
//!
//! Every section has a `Default` matching the production layout, and every
//! field may be omitted from a JSON config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::SessionWindow;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Holiday calendar configuration.
    pub calendar: CalendarConfig,
    /// Session-to-date binding layout.
    pub sessions: SessionConfig,
    /// Coarse trading-hour filter windows.
    pub trading_hours: TradingHoursConfig,
    /// Output locations.
    pub paths: PathsConfig,
    /// Volume ranking configuration.
    pub volume_rank: VolumeRankConfig,
}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Holiday calendar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Location of the `{"HOLIDAY": [...]}` document.
    pub holiday_path: PathBuf,
    /// Reuse the parsed document while its modification time is unchanged.
    pub cache_by_mtime: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            holiday_path: PathBuf::from("/mnt/common_info/holiday_calendar.json"),
            cache_by_mtime: true,
        }
    }
}

/// Session windows used to attach dates to tick times.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub day: SessionWindow,
    pub pre_midnight: SessionWindow,
    pub post_midnight: SessionWindow,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            day: SessionWindow::new("08:00:00.000", "17:00:00.000"),
            pre_midnight: SessionWindow::new("20:00:00.000", "24:00:00.000"),
            post_midnight: SessionWindow::new("00:00:00.000", "03:00:00.000"),
        }
    }
}

/// Windows of the coarse trading-hour filter. Bounds are exclusive and a
/// window whose end sorts before its start wraps midnight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingHoursConfig {
    pub windows: Vec<SessionWindow>,
}

impl Default for TradingHoursConfig {
    fn default() -> Self {
        Self {
            windows: vec![
                SessionWindow::new("20:58:59", "02:30:01"),
                SessionWindow::new("08:58:59", "11:30:01"),
                SessionWindow::new("13:28:59", "15:00:01"),
            ],
        }
    }
}

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory receiving one `<date>.json` rank table per trading day.
    pub volume_rank_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            volume_rank_dir: PathBuf::from("/mnt/common_info/volume_rank/"),
        }
    }
}

/// Volume ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeRankConfig {
    /// Number of most-traded instruments reported per root by default.
    pub top_n: usize,
}

impl Default for VolumeRankConfig {
    fn default() -> Self {
        Self { top_n: 2 }
    }
}
