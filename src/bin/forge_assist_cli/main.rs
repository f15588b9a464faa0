// ABOUTME: Forge Assist CLI for running analytics, simulations, and proposals on load series files
// ABOUTME: Reads JSON inputs, prints JSON results on stdout, and logs to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors
//!
//! Usage:
//! ```bash
//! # Analytics snapshot and threshold check for a program
//! forge-assist-cli analyze --series program.json --history history.json
//!
//! # Predict the effect of a list of change descriptors
//! forge-assist-cli simulate --series program.json --changes changes.json
//!
//! # Proposals for a trigger in a given week
//! forge-assist-cli propose --series program.json --trigger highACWR --week 4
//!
//! # Smooth week-to-week progression across a phase
//! forge-assist-cli phase --series program.json --name Accumulation --start 1 --end 4
//!
//! # Check how free text is understood
//! forge-assist-cli parse "shift tue week 2 forward 1 day"
//! ```

mod commands;

use clap::{Parser, Subcommand};
use forge_assist::config::LogLevel;
use forge_assist::errors::{AppError, AppResult};
use forge_assist::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "forge-assist-cli",
    about = "Forge Assist workload analytics CLI",
    long_about = "Run workload analytics, impact simulations, and remediation proposals against daily load series stored as JSON arrays."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Pre-program daily loads (JSON array) used as analytics history
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute ACWR, monotony, and strain and run the threshold monitor
    Analyze {
        /// Program daily loads (JSON array)
        #[arg(long)]
        series: PathBuf,
    },

    /// Predict the impact of change descriptors
    Simulate {
        /// Program daily loads (JSON array)
        #[arg(long)]
        series: PathBuf,

        /// Change descriptors (JSON array)
        #[arg(long)]
        changes: PathBuf,
    },

    /// Generate proposals for a trigger
    Propose {
        /// Program daily loads (JSON array)
        #[arg(long)]
        series: PathBuf,

        /// Trigger name: highACWR, highMonotony, lowLoad, highStrain
        #[arg(long)]
        trigger: String,

        /// Target week, defaults to the current week
        #[arg(long)]
        week: Option<u32>,
    },

    /// Suggest progression smoothing for a phase
    Phase {
        /// Program daily loads (JSON array)
        #[arg(long)]
        series: PathBuf,

        /// Phase name
        #[arg(long)]
        name: String,

        /// First week of the phase
        #[arg(long)]
        start: u32,

        /// Last week of the phase
        #[arg(long)]
        end: u32,
    },

    /// Parse a free-text command
    Parse {
        /// Command text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    LoggingConfig::from_env()
        .with_level(level)
        .init()
        .map_err(|e| AppError::internal(format!("logging setup failed: {e}")))?;

    let history = cli
        .history
        .as_deref()
        .map(commands::read_series)
        .transpose()?
        .unwrap_or_default();
    debug!(history_days = history.len(), "inputs loaded");

    match cli.command {
        Command::Analyze { series } => commands::analyze(&history, &series),
        Command::Simulate { series, changes } => commands::simulate(&history, &series, &changes),
        Command::Propose {
            series,
            trigger,
            week,
        } => commands::propose(&history, &series, &trigger, week),
        Command::Phase {
            series,
            name,
            start,
            end,
        } => commands::phase(&history, &series, &name, start, end),
        Command::Parse { text } => commands::parse(&text.join(" ")),
    }
}
