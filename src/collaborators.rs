// ABOUTME: Collaborator traits the engine is constructed with
// ABOUTME: Schedule accessor, exercise lookup, confirmation surface, mutation applier, preview surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! External collaborators.
//!
//! The engine never touches schedule storage or UI directly. Reads go through
//! [`ScheduleAccessor`], writes through [`MutationApplier`], and the only
//! suspension point for a user decision is [`ConfirmationSurface::confirm`].

pub use forge_core::notifications::{Notifier, Severity};

use crate::engine::PreviewTarget;
use forge_core::models::{
    ChangeDescriptor, EntryId, ExerciseMetadata, LoadSeries, ScheduleEntry, ScheduleScope,
};
use forge_intelligence::PredictedImpact;
use serde::Serialize;
use thiserror::Error;

/// Read access to the external schedule store
pub trait ScheduleAccessor: Send + Sync {
    /// Daily load totals for the whole program, week 1 Monday first
    fn load_series(&self) -> LoadSeries;

    /// Number of weeks in the program
    fn total_weeks(&self) -> u32;

    /// Entries inside `scope`
    fn entries_in(&self, scope: ScheduleScope) -> Vec<ScheduleEntry>;

    /// Look up one entry
    fn entry(&self, id: &EntryId) -> Option<ScheduleEntry>;

    /// First scheduled entry for an exercise name
    fn find_entry_by_exercise(&self, name: &str) -> Option<ScheduleEntry> {
        self.entries_in(ScheduleScope::Program)
            .into_iter()
            .find(|entry| entry.exercise_name.eq_ignore_ascii_case(name))
    }
}

/// Exercise library lookups
pub trait ExerciseLookup: Send + Sync {
    /// Metadata for a library id
    fn exercise(&self, id: &str) -> Option<ExerciseMetadata>;

    /// Library id for an exercise name
    fn find_by_name(&self, name: &str) -> Option<String>;

    /// Every exercise available for swaps
    fn catalog(&self) -> Vec<ExerciseMetadata>;
}

/// What the user is asked to confirm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationRequest {
    /// Question shown to the user
    pub message: String,
    /// Impact summary line
    pub details: String,
    /// Structured impact
    pub impact: PredictedImpact,
    /// Number of change descriptors awaiting confirmation
    pub change_count: usize,
}

/// User decision surface
#[async_trait::async_trait]
pub trait ConfirmationSurface: Send + Sync {
    /// Resolve to `true` when the user accepts the previewed change
    async fn confirm(&self, request: ConfirmationRequest) -> bool;
}

/// Rejection reported by the schedule store
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ApplyError(pub String);

/// The single channel through which confirmed changes reach the schedule
pub trait MutationApplier: Send + Sync {
    /// Apply one change
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot apply the change
    fn apply(&self, change: &ChangeDescriptor) -> Result<(), ApplyError>;
}

/// Visual preview tags on the calendar
pub trait PreviewSurface: Send + Sync {
    /// Tag targets as part of the pending change
    fn highlight(&self, targets: &[PreviewTarget]);

    /// Remove every preview tag at once
    fn clear_all(&self);
}
