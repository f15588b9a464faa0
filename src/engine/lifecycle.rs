// ABOUTME: Action lifecycle records, preview flags, and outcomes for simulate-and-confirm
// ABOUTME: One record per pending action moving Idle -> Previewing -> Confirmed or Cancelled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::executor::ExecutorAction;
use forge_core::models::{ChangeDescriptor, DaySlot, EntryId, ScheduleScope};
use forge_core::notifications::Severity;
use forge_intelligence::PredictedImpact;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Where an action is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    /// Nothing pending
    #[default]
    Idle,
    /// Impact shown, awaiting the user's decision
    Previewing,
    /// User accepted and the executor ran
    Confirmed,
    /// User declined, or a newer preview superseded this one
    Cancelled,
}

/// Parameters carried from the requesting handler to the executor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParams {
    /// Region the action operates on
    pub scope: Option<ScheduleScope>,
    /// Signed percentage for load adjustments
    pub percentage: Option<f64>,
    /// Entries dropped while planning, before any preview
    pub skipped: usize,
    /// Free-form subject, e.g. the exercise name
    pub subject: Option<String>,
}

impl ActionParams {
    /// Params scoped to a region
    #[must_use]
    pub fn scoped(scope: ScheduleScope) -> Self {
        Self {
            scope: Some(scope),
            ..Self::default()
        }
    }

    /// Attach a percentage
    #[must_use]
    pub const fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }

    /// Attach a count of entries skipped while planning
    #[must_use]
    pub const fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }

    /// Attach a subject
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Human label for the scope
    #[must_use]
    pub fn scope_label(&self) -> String {
        self.scope
            .map_or_else(|| "the schedule".to_owned(), |scope| scope.to_string())
    }
}

/// The pending action between preview and resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLifecycleRecord {
    /// Correlates the preview, confirmation, and execution logs
    pub id: Uuid,
    /// Executor action that will run on confirm
    pub action: ExecutorAction,
    /// Handler parameters
    pub params: ActionParams,
    /// Change descriptors under preview
    pub change_description: Vec<ChangeDescriptor>,
    /// Simulated effect
    pub impact: PredictedImpact,
    /// Current phase
    pub phase: LifecyclePhase,
}

/// Something carrying a preview tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "camelCase")]
pub enum PreviewTarget {
    /// An entry about to change
    Entry(EntryId),
    /// A day whose load is about to change
    Day(DaySlot),
}

/// Additive preview tags, removed in one sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewFlags {
    targets: HashSet<PreviewTarget>,
}

impl PreviewFlags {
    /// Tag every target referenced by `changes`, returning the new tags.
    ///
    /// Removing or moving an entry also tags the day it leaves.
    pub fn tag_changes(&mut self, changes: &[ChangeDescriptor]) -> Vec<PreviewTarget> {
        let mut added = Vec::new();
        for change in changes {
            let day = change
                .slot
                .filter(|_| change.entry.is_none() || change.affects_day())
                .or_else(|| {
                    change
                        .load_index
                        .filter(|_| change.entry.is_none())
                        .map(DaySlot::from_load_index)
                });
            let targets = change
                .entry
                .iter()
                .map(|id| PreviewTarget::Entry(id.clone()))
                .chain(day.map(PreviewTarget::Day));
            for target in targets {
                if self.targets.insert(target.clone()) {
                    added.push(target);
                }
            }
        }
        added
    }

    /// Remove every tag
    pub fn clear_all(&mut self) {
        self.targets.clear();
    }

    /// Whether `target` is tagged
    #[must_use]
    pub fn contains(&self, target: &PreviewTarget) -> bool {
        self.targets.contains(target)
    }

    /// Whether no tags are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Snapshot of the current tags
    #[must_use]
    pub fn snapshot(&self) -> HashSet<PreviewTarget> {
        self.targets.clone()
    }
}

/// How an action run ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    /// Action name
    pub action: ExecutorAction,
    /// Final phase
    pub phase: LifecyclePhase,
    /// Simulated effect shown in the preview
    pub impact: PredictedImpact,
    /// Changes successfully applied
    pub applied: usize,
    /// Changes skipped during planning or execution
    pub skipped: usize,
    /// Feedback shown to the user
    pub message: String,
    /// Severity of the feedback
    pub severity: Severity,
}

impl ActionOutcome {
    /// Outcome for an action that never reached the executor
    #[must_use]
    pub fn cancelled(action: ExecutorAction, impact: PredictedImpact, message: impl Into<String>) -> Self {
        Self {
            action,
            phase: LifecyclePhase::Cancelled,
            impact,
            applied: 0,
            skipped: 0,
            message: message.into(),
            severity: Severity::Info,
        }
    }

    /// Whether the executor ran
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.phase == LifecyclePhase::Confirmed
    }
}
