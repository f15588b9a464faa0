// ABOUTME: Collaborator bundle injected into the action engine at construction
// ABOUTME: The builder refuses to produce a bundle with a missing required collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use crate::collaborators::{
    ConfirmationSurface, ExerciseLookup, MutationApplier, Notifier, PreviewSurface,
    ScheduleAccessor,
};
use crate::errors::EngineError;
use forge_core::models::LoadSeries;
use std::sync::Arc;

/// Collaborators the engine reads from and writes to
///
/// # Dependencies
/// - `schedule`: read access to entries and the daily load series
/// - `exercises`: exercise library for swap suggestions
/// - `notifier`: transient user notices
/// - `confirmation`: the async user decision surface
/// - `applier`: the only write channel into the schedule
/// - `preview`: optional visual tagging of previewed targets
/// - `history`: daily loads preceding the program, used as analytics prefix
#[derive(Clone)]
pub struct EngineDependencies {
    schedule: Arc<dyn ScheduleAccessor>,
    exercises: Arc<dyn ExerciseLookup>,
    notifier: Arc<dyn Notifier>,
    confirmation: Arc<dyn ConfirmationSurface>,
    applier: Arc<dyn MutationApplier>,
    preview: Option<Arc<dyn PreviewSurface>>,
    history: LoadSeries,
}

impl EngineDependencies {
    /// Start building a dependency bundle
    #[must_use]
    pub fn builder() -> EngineDependenciesBuilder {
        EngineDependenciesBuilder::default()
    }

    /// Schedule accessor
    #[must_use]
    pub const fn schedule(&self) -> &Arc<dyn ScheduleAccessor> {
        &self.schedule
    }

    /// Exercise library
    #[must_use]
    pub const fn exercises(&self) -> &Arc<dyn ExerciseLookup> {
        &self.exercises
    }

    /// Notification sink
    #[must_use]
    pub const fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Confirmation surface
    #[must_use]
    pub const fn confirmation(&self) -> &Arc<dyn ConfirmationSurface> {
        &self.confirmation
    }

    /// Mutation applier
    #[must_use]
    pub const fn applier(&self) -> &Arc<dyn MutationApplier> {
        &self.applier
    }

    /// Preview surface, when the host renders one
    #[must_use]
    pub const fn preview(&self) -> Option<&Arc<dyn PreviewSurface>> {
        self.preview.as_ref()
    }

    /// Pre-program load history
    #[must_use]
    pub const fn history(&self) -> &LoadSeries {
        &self.history
    }
}

/// Builder for [`EngineDependencies`]
#[derive(Default)]
pub struct EngineDependenciesBuilder {
    schedule: Option<Arc<dyn ScheduleAccessor>>,
    exercises: Option<Arc<dyn ExerciseLookup>>,
    notifier: Option<Arc<dyn Notifier>>,
    confirmation: Option<Arc<dyn ConfirmationSurface>>,
    applier: Option<Arc<dyn MutationApplier>>,
    preview: Option<Arc<dyn PreviewSurface>>,
    history: LoadSeries,
}

impl EngineDependenciesBuilder {
    /// Set the schedule accessor
    #[must_use]
    pub fn schedule(mut self, schedule: Arc<dyn ScheduleAccessor>) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Set the exercise library
    #[must_use]
    pub fn exercises(mut self, exercises: Arc<dyn ExerciseLookup>) -> Self {
        self.exercises = Some(exercises);
        self
    }

    /// Set the notification sink
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the confirmation surface
    #[must_use]
    pub fn confirmation(mut self, confirmation: Arc<dyn ConfirmationSurface>) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    /// Set the mutation applier
    #[must_use]
    pub fn applier(mut self, applier: Arc<dyn MutationApplier>) -> Self {
        self.applier = Some(applier);
        self
    }

    /// Set the optional preview surface
    #[must_use]
    pub fn preview(mut self, preview: Arc<dyn PreviewSurface>) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Set the pre-program history
    #[must_use]
    pub fn history(mut self, history: LoadSeries) -> Self {
        self.history = history;
        self
    }

    /// Finish the bundle
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingDependency`] naming the first required
    /// collaborator that was not supplied
    pub fn build(self) -> Result<EngineDependencies, EngineError> {
        Ok(EngineDependencies {
            schedule: self
                .schedule
                .ok_or(EngineError::MissingDependency("schedule"))?,
            exercises: self
                .exercises
                .ok_or(EngineError::MissingDependency("exercises"))?,
            notifier: self
                .notifier
                .ok_or(EngineError::MissingDependency("notifier"))?,
            confirmation: self
                .confirmation
                .ok_or(EngineError::MissingDependency("confirmation"))?,
            applier: self
                .applier
                .ok_or(EngineError::MissingDependency("applier"))?,
            preview: self.preview,
            history: self.history,
        })
    }
}
