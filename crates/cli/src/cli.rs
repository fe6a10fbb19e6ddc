//! Command-line arguments for the `tickstamp` binary.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `trading-days` | List trading days in a date range |
//! | `sessions` | Show the session binding table of a date |
//! | `resolve` | Attach calendar dates to bare tick times |
//! | `in-hours` | Coarse trading-hour membership of tick times |
//! | `rank` | Rank a day's ticks by volume within each root |

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "tickstamp",
    version,
    about = "Trading-day calendar, session date resolution and volume ranking for futures ticks"
)]
pub struct Cli {
    /// JSON configuration file; built-in defaults are used when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List trading days (weekdays minus holidays) in [start, end].
    TradingDays(TradingDaysArgs),
    /// Show the session binding table for a reference date.
    Sessions(SessionsArgs),
    /// Resolve bare `HH:MM:SS.mmm` times against a reference date.
    Resolve(ResolveArgs),
    /// Check times against the coarse trading-hour windows.
    InHours(InHoursArgs),
    /// Rank instruments by final daily volume within each root.
    Rank(RankArgs),
}

#[derive(Debug, Args)]
pub struct TradingDaysArgs {
    /// First date, `YYYY-MM-DD`.
    #[arg(long)]
    pub start: String,
    /// Last date, `YYYY-MM-DD` (inclusive).
    #[arg(long)]
    pub end: String,
    /// Holiday document overriding the configured path.
    #[arg(long)]
    pub holidays: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SessionsArgs {
    /// Reference trading date, `YYYY-MM-DD`.
    #[arg(long)]
    pub date: String,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Reference trading date, `YYYY-MM-DD`.
    #[arg(long)]
    pub date: String,
    /// Fail when any time cannot be resolved.
    #[arg(long)]
    pub strict: bool,
    /// Times of day to resolve.
    #[arg(required = true)]
    pub times: Vec<String>,
}

#[derive(Debug, Args)]
pub struct InHoursArgs {
    /// Times of day to check.
    #[arg(required = true)]
    pub times: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RankArgs {
    /// JSON array of `{"root", "instrument", "volume"}` ticks.
    #[arg(long)]
    pub input: PathBuf,
    /// Trading date of the ticks; required with `--write`.
    #[arg(long)]
    pub date: Option<String>,
    /// Write `<volume_rank_dir>/<date>.json`.
    #[arg(long, requires = "date")]
    pub write: bool,
    /// Print the top N instruments per root; defaults to `volume_rank.top_n`.
    #[arg(long)]
    pub top: Option<usize>,
    /// Print the full rank table instead of the top instruments per root.
    #[arg(long, conflicts_with = "top")]
    pub full: bool,
}
