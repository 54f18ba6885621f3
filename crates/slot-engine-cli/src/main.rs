//! `slots` CLI — query appointment slots and day occupancy from the command line.
//!
//! Settings and bookings are read from JSON files, the way a request handler
//! would load them from its stores, and the result is printed as JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for a day with the default working hours and no bookings
//! slots available --date 2026-03-16
//!
//! # Slots against stored settings and bookings
//! slots available --date 2026-03-16 --settings settings.json --bookings bookings.json
//!
//! # Occupancy summary for a day
//! slots day-status --date 2026-03-16 --bookings bookings.json --pretty
//!
//! # Validate a requested meeting start before saving it
//! slots check --start 2026-03-16T10:15:00Z --bookings bookings.json
//!
//! # Print the default settings record
//! slots defaults --pretty
//! ```
//!
//! Logs go to stderr and honour `RUST_LOG`; `--verbose` turns on debug output.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::query::{self, parse_date, parse_instant};
use slot_engine::{BookedInterval, Settings};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Appointment slot and day occupancy queries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit debug logs on stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the slots of a day with their availability
    Available {
        /// Day to query (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Settings JSON file (defaults are used if omitted)
        #[arg(short, long)]
        settings: Option<String>,
        /// Bookings JSON file, an array of bookings (none if omitted)
        #[arg(short, long)]
        bookings: Option<String>,
    },
    /// Summarize how booked a day is
    DayStatus {
        /// Day to query (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Settings JSON file (defaults are used if omitted)
        #[arg(short, long)]
        settings: Option<String>,
        /// Bookings JSON file, an array of bookings (none if omitted)
        #[arg(short, long)]
        bookings: Option<String>,
    },
    /// Check whether a meeting can be booked at the given start time
    Check {
        /// Requested start (RFC 3339, or naive ISO 8601 read as UTC)
        #[arg(long)]
        start: String,
        /// Settings JSON file (defaults are used if omitted)
        #[arg(short, long)]
        settings: Option<String>,
        /// Bookings JSON file, an array of bookings (none if omitted)
        #[arg(short, long)]
        bookings: Option<String>,
    },
    /// Print the default settings record
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Available {
            date,
            settings,
            bookings,
        } => {
            let date = parse_date(&date).context("Invalid --date")?;
            let settings = load_settings(settings.as_deref())?;
            let bookings = load_bookings(bookings.as_deref())?;
            let response = query::available_slots(date, settings.as_ref(), &bookings)
                .context("Failed to compute available slots")?;
            print_json(&response, cli.pretty)?;
        }
        Commands::DayStatus {
            date,
            settings,
            bookings,
        } => {
            let date = parse_date(&date).context("Invalid --date")?;
            let settings = load_settings(settings.as_deref())?;
            let bookings = load_bookings(bookings.as_deref())?;
            let status = query::day_status(date, settings.as_ref(), &bookings)
                .context("Failed to compute day status")?;
            print_json(&status, cli.pretty)?;
        }
        Commands::Check {
            start,
            settings,
            bookings,
        } => {
            let start = parse_instant(&start).context("Invalid --start")?;
            let settings = load_settings(settings.as_deref())?;
            let bookings = load_bookings(bookings.as_deref())?;
            query::check_booking(start, settings.as_ref(), &bookings)
                .context("Booking rejected")?;
            println!("ok");
        }
        Commands::Defaults => {
            print_json(&Settings::default(), cli.pretty)?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, falling back to `warn`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(path: Option<&str>) -> Result<Option<Settings>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = read_file(path)?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse settings JSON: {}", path))?;
    debug!(path, "loaded settings");
    Ok(Some(settings))
}

fn load_bookings(path: Option<&str>) -> Result<Vec<BookedInterval>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = read_file(path)?;
    let bookings: Vec<BookedInterval> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse bookings JSON: {}", path))?;
    debug!(path, count = bookings.len(), "loaded bookings");
    Ok(bookings)
}

fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
