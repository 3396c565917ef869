//! Hybrid vector clock command-line tool
//!
//! Creates, advances, merges and compares clocks persisted as JSON.
//!
//! Usage:
//!   vclock new --actor A --strategy monotonic-increase -o a.json
//!   vclock tick a.json --actor A -o a.json
//!   vclock compare a.json b.json

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;
use vclock::{ProviderConfig, TimestampProviderStrategy};
use vclock_cli::{compare, load_clock, load_config, new_clock, store_clock};

#[derive(Parser, Debug)]
#[command(name = "vclock")]
#[command(about = "Create, advance, merge and compare hybrid vector clocks")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a clock for an actor
    New {
        /// Actor owning the clock
        #[arg(short, long)]
        actor: String,

        /// Timestamp provider strategy
        #[arg(short, long, default_value_t = TimestampProviderStrategy::WallClock)]
        strategy: TimestampProviderStrategy,

        /// Provider config file (JSON); overrides --strategy
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the clock here instead of only printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Record one event for an actor
    Tick {
        clock: PathBuf,

        #[arg(short, long)]
        actor: String,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge two clocks, keeping the first clock's provider
    Merge {
        left: PathBuf,
        right: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare two clocks
    Compare { left: PathBuf, right: PathBuf },
    /// Print a clock in its short form
    Show { clock: PathBuf },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Command::New {
            actor,
            strategy,
            config,
            output,
        } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => ProviderConfig::for_strategy(strategy),
            };
            let clock = new_clock(&actor, &config);
            debug!(clock = %clock, "Created clock");
            println!("{}", store_clock(&clock, output.as_deref())?);
        }
        Command::Tick {
            clock,
            actor,
            output,
        } => {
            let ticked = load_clock(&clock)?.incrementing(actor);
            debug!(clock = %ticked, "Incremented clock");
            println!("{}", store_clock(&ticked, output.as_deref())?);
        }
        Command::Merge {
            left,
            right,
            output,
        } => {
            let merged = load_clock(&left)?.merging(&load_clock(&right)?);
            debug!(clock = %merged, "Merged clocks");
            println!("{}", store_clock(&merged, output.as_deref())?);
        }
        Command::Compare { left, right } => {
            let comparison = compare(&load_clock(&left)?, &load_clock(&right)?);
            println!("{comparison}");
        }
        Command::Show { clock } => {
            println!("{}", load_clock(&clock)?);
        }
    }

    Ok(())
}
