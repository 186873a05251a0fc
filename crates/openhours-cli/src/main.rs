//! OpenHours - query a weekly opening-hours schedule from the command line.
//!
//! The schedule is read from a JSON file:
//!
//! ```text
//! openhours --config hours.json check
//! openhours --config hours.json at 2024-12-23T10:00
//! openhours --config hours.json on monday
//! openhours --config hours.json show
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use openhours_core::{DaySchedule, WeekSchedule};
use tracing_subscriber::EnvFilter;

/// Accepted formats for the `at` argument.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// OpenHours - weekly opening hours with date exceptions
#[derive(Parser, Debug)]
#[command(name = "openhours", version, about)]
struct Args {
    /// Schedule file (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Validate the schedule file
    Check,
    /// Whether the schedule is open at a moment (default: now)
    At {
        /// Local date and time, YYYY-MM-DDTHH:MM[:SS]
        #[arg(value_parser = parse_datetime)]
        datetime: Option<NaiveDateTime>,
    },
    /// Whether a weekday has any opening hours
    On {
        /// Day name (any case)
        weekday: String,
    },
    /// Print the weekly schedule and exceptions
    Show,
}

/// Parses a local date-time argument.
fn parse_datetime(s: &str) -> std::result::Result<NaiveDateTime, String> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("invalid date-time '{}' (expected YYYY-MM-DDTHH:MM)", s))
}

/// Initialize console logging.
fn init_logging(args: &Args) {
    let log_level = if args.debug { "debug" } else { &args.log_level };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("openhours={},warn", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Formats a day schedule as a comma-separated list of ranges.
fn describe(day: &DaySchedule) -> String {
    if day.is_empty() {
        return "closed".to_string();
    }

    day.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn open_or_closed(open: bool) -> String {
    String::from(if open { "open" } else { "closed" })
}

/// Runs a command against the schedule text and returns its output.
fn execute(command: &Command, json: &str) -> Result<String> {
    let schedule = WeekSchedule::from_json_str(json).context("Invalid schedule")?;

    let output = match command {
        Command::Check => "valid".to_string(),
        Command::At { datetime } => {
            let at = datetime.unwrap_or_else(|| Local::now().naive_local());
            tracing::debug!("Checking schedule at {}", at);
            open_or_closed(schedule.is_open_at(at))
        }
        Command::On { weekday } => open_or_closed(schedule.is_open_on(weekday)?),
        Command::Show => {
            let mut lines: Vec<String> = schedule
                .for_week()
                .map(|(day, hours)| format!("{:<10} {}", day, describe(hours)))
                .collect();

            if !schedule.exceptions().is_empty() {
                lines.push("exceptions:".to_string());
                lines.extend(
                    schedule
                        .exceptions()
                        .iter()
                        .map(|(date, hours)| format!("{} {}", date, describe(hours))),
                );
            }

            lines.join("\n")
        }
    };

    Ok(output)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    tracing::debug!("Loading schedule from {:?}", args.config);
    let json = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read {}", args.config.display()))?;

    println!("{}", execute(&args.command, &json)?);
    Ok(())
}
