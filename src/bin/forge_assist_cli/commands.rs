// ABOUTME: Subcommand implementations for the Forge Assist CLI
// ABOUTME: Loads JSON inputs, runs the intelligence layer, and prints JSON results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use forge_assist::commands::parse_command;
use forge_assist::errors::{AppError, AppResult, EngineError};
use forge_assist::intelligence::{
    AnalyticsSnapshot, ImpactSimulator, ProposalConfig, ProposalContext, ProposalGenerator,
    ThresholdConfig, ThresholdMonitor, Trigger,
};
use forge_assist::models::{ChangeDescriptor, LoadSeries};
use forge_assist::{Notifier, Severity};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::info;

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str, severity: Severity, _duration_ms: u64) {
        eprintln!("[{severity}] {message}");
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("cannot read {}: {e}", path.display())).with_source(e)
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load a daily load series from a JSON array file
pub fn read_series(path: &Path) -> AppResult<LoadSeries> {
    read_json::<Vec<f64>>(path).map(LoadSeries::new)
}

fn print_json(value: &impl Serialize) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn generator(history: &LoadSeries) -> AppResult<ProposalGenerator> {
    let config = ProposalConfig::default();
    config.validate()?;
    Ok(ProposalGenerator::new(
        ImpactSimulator::new(history.clone()),
        config,
    ))
}

pub fn analyze(history: &LoadSeries, series: &Path) -> AppResult<()> {
    let series = read_series(series)?;
    let snapshot = AnalyticsSnapshot::compute(history, &series);
    let thresholds = ThresholdConfig::from_env()?;
    let monitor = ThresholdMonitor::new(thresholds, generator(history)?);
    let report = monitor.check_and_notify(&snapshot, &series, &StderrNotifier);
    info!(breaches = report.breaches.len(), "analysis complete");
    print_json(&json!({ "snapshot": snapshot, "monitor": report }))
}

pub fn simulate(history: &LoadSeries, series: &Path, changes: &Path) -> AppResult<()> {
    let series = read_series(series)?;
    let changes: Vec<ChangeDescriptor> = read_json(changes)?;
    let impact = ImpactSimulator::new(history.clone()).simulate(&changes, &series);
    eprintln!("{impact}");
    print_json(&impact)
}

pub fn propose(
    history: &LoadSeries,
    series: &Path,
    trigger: &str,
    week: Option<u32>,
) -> AppResult<()> {
    let series = read_series(series)?;
    let context = week.map_or_else(
        || ProposalContext::new(&series),
        |week| ProposalContext::for_week(&series, week),
    );
    let proposals = generator(history)?.propose(&Trigger::from_name(trigger), &context);
    print_json(&proposals)
}

pub fn phase(
    history: &LoadSeries,
    series: &Path,
    name: &str,
    start: u32,
    end: u32,
) -> AppResult<()> {
    let series = read_series(series)?;
    let proposals = generator(history)?.propose_phase_optimizations(name, start, end, &series);
    print_json(&proposals)
}

pub fn parse(text: &str) -> AppResult<()> {
    let parsed = parse_command(text)
        .ok_or_else(|| EngineError::UnrecognizedCommand(text.to_owned()))?;
    print_json(&json!({ "pattern": parsed.pattern, "request": parsed.request }))
}
