// ABOUTME: Executes confirmed actions by routing change descriptors through the mutation applier
// ABOUTME: Re-validates each target at execution time and composes the user-facing feedback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Action executor.
//!
//! Everything between "the user said yes" and "the schedule changed" lives
//! here. Targets are re-read from the schedule before each write, so an entry
//! deleted or edited while the confirmation was open is skipped rather than
//! clobbered.

use super::lifecycle::ActionParams;
use crate::collaborators::{MutationApplier, ScheduleAccessor};
use crate::errors::{AppError, AppResult, EngineError};
use forge_core::models::{Change, ChangeDescriptor, LoadType};
use forge_core::notifications::Severity;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Loads this close are treated as unchanged since preview
const LOAD_MATCH_TOLERANCE: f64 = 0.5;

/// Every action the executor knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExecutorAction {
    /// Remove all entries in a week
    ClearWeek,
    /// Remove all entries on a day
    ClearDay,
    /// Remove all entries in a phase
    ClearPhase,
    /// Remove one placeholder entry
    RemovePlaceholder,
    /// Move a week's entries
    ShiftWeek,
    /// Move a day's entries
    ShiftDay,
    /// Lower loads
    ApplyLoadReduction,
    /// Raise loads
    ApplyLoadIncrease,
    /// Empty a day
    ApplyRestDay,
    /// Step an intensity prescription
    ApplyIntensityChange,
    /// Exchange two days
    ApplyDaySwap,
}

impl ExecutorAction {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClearWeek => "clearWeek",
            Self::ClearDay => "clearDay",
            Self::ClearPhase => "clearPhase",
            Self::RemovePlaceholder => "removePlaceholder",
            Self::ShiftWeek => "shiftWeek",
            Self::ShiftDay => "shiftDay",
            Self::ApplyLoadReduction => "applyLoadReduction",
            Self::ApplyLoadIncrease => "applyLoadIncrease",
            Self::ApplyRestDay => "applyRestDay",
            Self::ApplyIntensityChange => "applyIntensityChange",
            Self::ApplyDaySwap => "applyDaySwap",
        }
    }
}

impl fmt::Display for ExecutorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutorAction {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "clearWeek" => Self::ClearWeek,
            "clearDay" => Self::ClearDay,
            "clearPhase" => Self::ClearPhase,
            "removePlaceholder" => Self::RemovePlaceholder,
            "shiftWeek" => Self::ShiftWeek,
            "shiftDay" => Self::ShiftDay,
            "applyLoadReduction" => Self::ApplyLoadReduction,
            "applyLoadIncrease" => Self::ApplyLoadIncrease,
            "applyRestDay" => Self::ApplyRestDay,
            "applyIntensityChange" => Self::ApplyIntensityChange,
            "applyDaySwap" => Self::ApplyDaySwap,
            other => return Err(EngineError::UnknownAction(other.to_owned())),
        })
    }
}

/// What the executor did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Descriptors applied
    pub applied: usize,
    /// Descriptors skipped, including those dropped during planning
    pub skipped: usize,
    /// Feedback line
    pub message: String,
    /// Feedback severity
    pub severity: Severity,
}

/// Applies confirmed changes
pub struct Executor<'a> {
    schedule: &'a dyn ScheduleAccessor,
    applier: &'a dyn MutationApplier,
}

impl<'a> Executor<'a> {
    /// Bind the executor to its collaborators
    #[must_use]
    pub const fn new(schedule: &'a dyn ScheduleAccessor, applier: &'a dyn MutationApplier) -> Self {
        Self { schedule, applier }
    }

    /// Apply every change for `action`, skipping the ones that no longer fit
    #[must_use]
    pub fn execute(
        &self,
        action: ExecutorAction,
        params: &ActionParams,
        changes: &[ChangeDescriptor],
    ) -> ExecutionReport {
        let total_weeks = self.schedule.total_weeks();
        let mut applied = 0;
        let mut failed = 0;

        for change in changes {
            match self.apply_checked(action, change, total_weeks) {
                Ok(()) => applied += 1,
                Err(e) => {
                    warn!(action = %action, change = %change.describe(), error = %e, "change skipped");
                    failed += 1;
                }
            }
        }

        let skipped = failed + params.skipped;
        let (message, severity) = compose_feedback(action, params, changes, applied, skipped);
        info!(action = %action, applied, skipped, "action executed");
        ExecutionReport {
            applied,
            skipped,
            message,
            severity,
        }
    }

    fn apply_checked(
        &self,
        action: ExecutorAction,
        change: &ChangeDescriptor,
        total_weeks: u32,
    ) -> AppResult<()> {
        if let Some(id) = &change.entry {
            let current = self
                .schedule
                .entry(id)
                .ok_or_else(|| EngineError::UnresolvableReference(id.to_string()))?;

            if let Change::ModifyLoad { original_load, .. } = change.change {
                if action == ExecutorAction::ApplyLoadReduction
                    && (current.load - original_load).abs() > LOAD_MATCH_TOLERANCE
                {
                    return Err(AppError::invalid_input(format!(
                        "load of {id} changed from {original_load} to {} since preview",
                        current.load
                    ))
                    .with_entry_id(id.as_str()));
                }
            }
        }

        if let Change::Move { to, .. } = change.change {
            if to.week == 0 || to.week > total_weeks {
                return Err(AppError::invalid_input(format!(
                    "destination {to} is outside weeks 1-{total_weeks}"
                )));
            }
        }

        debug!(change = %change.describe(), "applying change");
        self.applier
            .apply(change)
            .map_err(|e| AppError::mutation_failed(e.to_string()).with_source(e))
    }
}

fn entries(count: usize) -> String {
    if count == 1 {
        "1 entry".to_owned()
    } else {
        format!("{count} entries")
    }
}

fn compose_feedback(
    action: ExecutorAction,
    params: &ActionParams,
    changes: &[ChangeDescriptor],
    applied: usize,
    skipped: usize,
) -> (String, Severity) {
    let scope = params.scope_label();
    let percent = params.percentage.unwrap_or_default().abs();

    let base = match action {
        ExecutorAction::ClearWeek | ExecutorAction::ClearDay | ExecutorAction::ClearPhase => {
            if applied == 0 {
                return (format!("No entries found in {scope} to clear."), Severity::Info);
            }
            format!("Cleared {} from {scope}.", entries(applied))
        }
        ExecutorAction::RemovePlaceholder => params.subject.as_ref().map_or_else(
            || "Removed placeholder.".to_owned(),
            |name| format!("Removed placeholder {name}."),
        ),
        ExecutorAction::ShiftWeek | ExecutorAction::ShiftDay => {
            if applied == 0 && skipped == 0 {
                return (format!("No entries found in {scope} to shift."), Severity::Info);
            }
            if skipped > 0 {
                return (
                    format!("Shifted {} ({skipped} skipped).", entries(applied)),
                    Severity::Warning,
                );
            }
            format!("Shifted {} from {scope}.", entries(applied))
        }
        ExecutorAction::ApplyLoadReduction => {
            format!("Applied load reduction ({percent}%) to {} in {scope}.", entries(applied))
        }
        ExecutorAction::ApplyLoadIncrease => {
            format!("Applied load increase ({percent}%) to {} in {scope}.", entries(applied))
        }
        ExecutorAction::ApplyRestDay => {
            format!("Converted {scope} to a rest day ({} removed).", entries(applied))
        }
        ExecutorAction::ApplyIntensityChange => intensity_feedback(changes),
        ExecutorAction::ApplyDaySwap => format!("Swapped days: moved {}.", entries(applied)),
    };

    if skipped > 0 {
        (
            format!("{base} {} skipped.", entries(skipped)),
            Severity::Warning,
        )
    } else {
        (base, Severity::Success)
    }
}

fn intensity_feedback(changes: &[ChangeDescriptor]) -> String {
    changes
        .iter()
        .find_map(|change| match change.change {
            Change::ModifyIntensity {
                load_type,
                original_value,
                new_value,
                ..
            } => {
                let verb = if new_value >= original_value {
                    "Increased"
                } else {
                    "Decreased"
                };
                Some(format!(
                    "{verb} intensity. New {}: {}",
                    load_type.label(),
                    format_value(load_type, new_value)
                ))
            }
            _ => None,
        })
        .unwrap_or_else(|| "Intensity updated.".to_owned())
}

fn format_value(load_type: LoadType, value: f64) -> String {
    match load_type {
        LoadType::Percent => format!("{value:.0}%"),
        _ => format!("{value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::errors::ErrorCode;
    use forge_core::models::ScheduleScope;

    #[test]
    fn test_action_names_parse() {
        for action in [
            ExecutorAction::ClearWeek,
            ExecutorAction::ShiftDay,
            ExecutorAction::ApplyDaySwap,
            ExecutorAction::RemovePlaceholder,
        ] {
            assert_eq!(action.as_str().parse::<ExecutorAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let err = "teleportWeek".parse::<ExecutorAction>().unwrap_err();
        assert!(matches!(&err, EngineError::UnknownAction(name) if name == "teleportWeek"));

        let err = AppError::from(err);
        assert_eq!(err.code, ErrorCode::UnknownAction);
        assert_eq!(err.message, "Action \"teleportWeek\" not yet implemented.");
    }

    #[test]
    fn test_feedback_pluralizes_and_flags_skips() {
        let params = ActionParams::scoped(ScheduleScope::Week { week: 2 });
        let (message, severity) = compose_feedback(ExecutorAction::ClearWeek, &params, &[], 1, 0);
        assert_eq!(message, "Cleared 1 entry from week 2.");
        assert_eq!(severity, Severity::Success);

        let (message, severity) = compose_feedback(ExecutorAction::ShiftWeek, &params, &[], 3, 2);
        assert_eq!(message, "Shifted 3 entries (2 skipped).");
        assert_eq!(severity, Severity::Warning);
    }

    #[test]
    fn test_intensity_feedback_names_new_value() {
        let change = ChangeDescriptor {
            entry: None,
            slot: None,
            load_index: Some(0),
            change: Change::ModifyIntensity {
                load_type: LoadType::Rpe,
                original_value: 8.0,
                new_value: 8.5,
                original_load: 400.0,
                new_load: 425.0,
            },
        };
        assert_eq!(intensity_feedback(&[change]), "Increased intensity. New RPE: 8.5");
    }
}
