//! Command execution. Every command produces a JSON value for stdout.

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tickstamp_calendar::TradingCalendarService;
use tickstamp_core::{format_date, parse_date, Config, RawTick, VolumeRankTable};
use tickstamp_ingestion::{
    SessionBindingTable, TimestampStamper, TradingHoursFilter, VolumeRanker,
};
use tracing::{info, warn};

use crate::cli::{
    Cli, Command, InHoursArgs, RankArgs, ResolveArgs, SessionsArgs, TradingDaysArgs,
};

/// Load the configuration named on the command line, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

pub fn run(cli: &Cli) -> Result<Value> {
    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::TradingDays(args) => trading_days(&config, args),
        Command::Sessions(args) => sessions(&config, args),
        Command::Resolve(args) => resolve(&config, args),
        Command::InHours(args) => in_hours(&config, args),
        Command::Rank(args) => rank(&config, args),
    }
}

fn trading_days(config: &Config, args: &TradingDaysArgs) -> Result<Value> {
    let mut calendar = config.calendar.clone();
    if let Some(path) = &args.holidays {
        calendar.holiday_path = path.clone();
    }
    let service = TradingCalendarService::from_config(&calendar);
    let days = service
        .trading_day_strings(&args.start, &args.end)
        .with_context(|| {
            format!(
                "failed to enumerate trading days with {}",
                calendar.holiday_path.display()
            )
        })?;
    Ok(json!(days))
}

fn sessions(config: &Config, args: &SessionsArgs) -> Result<Value> {
    let date = parse_date(&args.date)?;
    let table = SessionBindingTable::build(date, &config.sessions);
    let bindings: Vec<Value> = table
        .bindings()
        .iter()
        .map(|b| {
            json!({
                "start": b.window.start,
                "end": b.window.end,
                "date": format_date(b.date),
            })
        })
        .collect();
    Ok(json!(bindings))
}

fn resolve(config: &Config, args: &ResolveArgs) -> Result<Value> {
    let date = parse_date(&args.date)?;
    let mut stamper = TimestampStamper::new(date, &config.sessions);
    let stamped: Vec<Value> = stamper
        .stamp_all(args.times.iter().map(String::as_str))
        .iter()
        .map(|ts| {
            json!({
                "exchange_timestamp_str": ts.to_string(),
                "resolved": ts.is_resolved(),
            })
        })
        .collect();

    let stats = stamper.stats();
    if args.strict && stats.unresolved > 0 {
        bail!(
            "{} of {} times fall outside every session window for {}",
            stats.unresolved,
            stats.total,
            args.date
        );
    }
    Ok(json!(stamped))
}

fn in_hours(config: &Config, args: &InHoursArgs) -> Result<Value> {
    let filter = TradingHoursFilter::from_config(&config.trading_hours);
    let out: serde_json::Map<String, Value> = args
        .times
        .iter()
        .map(|t| (t.clone(), Value::Bool(filter.in_trading_hour(t))))
        .collect();
    Ok(Value::Object(out))
}

fn rank(config: &Config, args: &RankArgs) -> Result<Value> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read ticks from {}", args.input.display()))?;
    let ticks: Vec<RawTick> = serde_json::from_str(&raw)
        .with_context(|| format!("malformed tick file {}", args.input.display()))?;

    let mut ranker = VolumeRanker::new();
    ranker.add_ticks(&ticks);
    let table = ranker.rank();
    if !ranker.regressions().is_empty() {
        warn!(
            count = ranker.regressions().len(),
            "accumulated volume decreased; final volumes use the maximum"
        );
    }

    if args.write {
        let date = match &args.date {
            Some(date) => parse_date(date)?,
            None => bail!("--write needs --date"),
        };
        let path = write_rank_table(&config.paths.volume_rank_dir, &format_date(date), &table)?;
        info!(path = %path.display(), roots = table.len(), "wrote volume rank table");
    }

    if args.full {
        return Ok(serde_json::to_value(&table)?);
    }
    let n = args.top.unwrap_or(config.volume_rank.top_n);
    Ok(top_instruments(&table, n))
}

/// root -> the `n` most traded instruments, best first.
fn top_instruments(table: &VolumeRankTable, n: usize) -> Value {
    let out: serde_json::Map<String, Value> = table
        .roots()
        .map(|root| (root.to_string(), json!(table.top_instruments(root, n))))
        .collect();
    Value::Object(out)
}

/// Persist a rank table as `<dir>/<date>.json`.
pub fn write_rank_table(dir: &Path, date: &str, table: &VolumeRankTable) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("{date}.json"));
    let body = serde_json::to_string_pretty(table)?;
    std::fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
