//! `slotctl` — check a proposed event for double-booking and suggest free
//! slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Which participants would be double-booked? (stdin → stdout)
//! echo '{"proposedEvent": {...}, "existingEvents": [...]}' | slotctl check
//!
//! # Check against a stored calendar when the request carries no events
//! slotctl check -i request.json --events calendar.json
//!
//! # Suggest alternatives, pinning "now" for reproducible output
//! slotctl suggest -i request.json --now 2026-03-15T00:00:00Z
//!
//! # Both at once; suggestions only when there are conflicts
//! slotctl resolve -i request.json --config scheduling.toml --working-hours 08:00-18:00
//! ```

mod settings;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use slot_engine::api::{self, ScheduleRequest};
use slot_engine::{Clock, Event, FixedClock, SchedulingConfig, SystemClock};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::settings::ConfigOverrides;

#[derive(Parser)]
#[command(
    name = "slotctl",
    version,
    about = "Calendar conflict detection and slot suggestion"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report participants whose existing events collide with the proposal
    Check(RequestArgs),
    /// Suggest conflict-free alternative slots for the proposal
    Suggest(RequestArgs),
    /// Report conflicts and, when there are any, suggested alternatives
    Resolve(RequestArgs),
}

#[derive(Args)]
struct RequestArgs {
    /// Request JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// JSON array of stored events, used when the request has no existingEvents
    #[arg(long)]
    events: Option<String>,
    /// Instant to treat as "now" (RFC 3339); defaults to the system clock
    #[arg(long)]
    now: Option<String>,
    #[command(flatten)]
    overrides: ConfigOverrides,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check(args) => {
            let (request, store, config) = args.load()?;
            let response = api::check_conflicts(request, &store, &config)?;
            debug!(participants = response.conflicts.len(), "conflict check done");
            args.emit(&response)?;
        }
        Commands::Suggest(args) => {
            let (request, store, config) = args.load()?;
            let clock = args.clock()?;
            let response = api::suggest(request, &store, &config, &clock)?;
            args.emit(&response)?;
        }
        Commands::Resolve(args) => {
            let (request, store, config) = args.load()?;
            let clock = args.clock()?;
            let response = api::resolve(request, &store, &config, &clock)?;
            args.emit(&response)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

impl RequestArgs {
    fn load(&self) -> Result<(ScheduleRequest, Vec<Event>, SchedulingConfig)> {
        let raw = read_input(self.input.as_deref())?;
        let request = ScheduleRequest::from_json(&raw).context("Failed to parse request JSON")?;

        let store = match self.events.as_deref() {
            Some(path) => {
                let raw = read_input(Some(path))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse events file: {}", path))?
            }
            None => Vec::new(),
        };

        let config = self.overrides.resolve()?;
        debug!(?config, stored = store.len(), "request loaded");
        Ok((request, store, config))
    }

    fn clock(&self) -> Result<Box<dyn Clock>> {
        match self.now.as_deref() {
            Some(now) => {
                let instant = slot_engine::instant::parse(now)
                    .with_context(|| format!("Invalid --now value: {}", now))?;
                Ok(Box::new(FixedClock(instant)))
            }
            None => Ok(Box::new(SystemClock)),
        }
    }

    fn emit<T: Serialize>(&self, response: &T) -> Result<()> {
        let mut json = serde_json::to_string_pretty(response)?;
        json.push('\n');
        write_output(self.output.as_deref(), &json)
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
