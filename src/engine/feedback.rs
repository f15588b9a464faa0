// ABOUTME: Athlete feedback handling: per-exercise RPE history, load recommendations, deload checks
// ABOUTME: The engine owns the performance history; applying a recommendation goes through preview
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::executor::ExecutorAction;
use super::lifecycle::ActionParams;
use super::requests::ActionResult;
use super::ActionEngine;
use crate::collaborators::Severity;
use crate::errors::{AppError, AppResult};
use forge_core::constants::adaptive::{FEEDBACK_RPE_MAX, FEEDBACK_RPE_MIN};
use forge_core::models::{ChangeDescriptor, EntryId, ScheduleScope};
use forge_intelligence::{
    detect_deload_need, DeloadAssessment, DeloadMetrics, LoadAdjustment, PerformanceHistory,
};
use tracing::{debug, info};

impl ActionEngine {
    /// Record one session of RPE feedback and recommend a load change.
    ///
    /// History is keyed by the library id when `exercise` resolves to one,
    /// otherwise by the lowercased name.
    ///
    /// # Errors
    ///
    /// Returns an error, after notifying, when `rpe` is outside 1-10
    pub fn record_feedback(
        &self,
        exercise: &str,
        rpe: f64,
        reps_completed: u32,
    ) -> AppResult<LoadAdjustment> {
        if !(FEEDBACK_RPE_MIN..=FEEDBACK_RPE_MAX).contains(&rpe) {
            return Err(self.surface(AppError::invalid_input(format!(
                "RPE must be between {FEEDBACK_RPE_MIN} and {FEEDBACK_RPE_MAX}, got {rpe}."
            ))));
        }

        let key = self
            .deps
            .exercises()
            .find_by_name(exercise)
            .unwrap_or_else(|| exercise.trim().to_lowercase());
        let adjustment = self
            .lock_state()
            .performance
            .record(&key, rpe, reps_completed);
        debug!(
            exercise = %key,
            rpe,
            reps_completed,
            adjustment = adjustment.load_adjustment,
            "feedback recorded"
        );
        self.notify(&format!("Recommendation: {adjustment}"), Severity::Info);
        Ok(adjustment)
    }

    /// Snapshot of the feedback recorded so far
    #[must_use]
    pub fn performance_history(&self) -> PerformanceHistory {
        self.lock_state().performance.clone()
    }

    /// Forget all recorded feedback
    pub fn reset_performance_history(&self) {
        self.lock_state().performance.clear();
        info!("performance history reset");
    }

    /// Check analytics and feedback fatigue for a due deload, warning when one is
    #[must_use]
    pub fn detect_deload_need(&self) -> DeloadAssessment {
        let fatigue = self.lock_state().performance.fatigue();
        let metrics = DeloadMetrics::from_snapshot(&self.snapshot(), fatigue);
        let assessment = detect_deload_need(&metrics, &self.settings.thresholds);
        if let Some(strategy) = assessment.strategy {
            info!(%strategy, reason = %assessment.reason, "deload recommended");
            self.notify(
                &format!("Deload recommended ({strategy}): {}", assessment.reason),
                Severity::Warning,
            );
        }
        assessment
    }

    pub(super) async fn apply_feedback(
        &self,
        id: &EntryId,
        percentage: f64,
    ) -> AppResult<ActionResult> {
        if !percentage.is_finite() || percentage <= -100.0 {
            return Err(self.surface(AppError::invalid_input(format!(
                "Load adjustment must be above -100 percent, got {percentage}."
            ))));
        }
        let Some(entry) = self.deps.schedule().entry(id) else {
            return Ok(self.inform(
                format!("Entry {id} no longer exists."),
                Severity::Warning,
            ));
        };

        let new_load = (entry.load * (1.0 + percentage / 100.0)).round().max(0.0);
        if (new_load - entry.load).abs() < 1.0 {
            return Ok(self.inform(
                format!(
                    "{} load is unchanged by a {percentage}% adjustment.",
                    entry.exercise_name
                ),
                Severity::Info,
            ));
        }

        let (action, verb) = if new_load > entry.load {
            (ExecutorAction::ApplyLoadIncrease, "Increase")
        } else {
            (ExecutorAction::ApplyLoadReduction, "Decrease")
        };
        let message = format!(
            "{verb} {} load by {}% ({} to {new_load})?",
            entry.exercise_name,
            percentage.abs(),
            entry.load
        );
        let params = ActionParams::scoped(ScheduleScope::Day { slot: entry.slot })
            .with_percentage(percentage)
            .with_subject(entry.exercise_name.clone());
        let changes = vec![ChangeDescriptor::modify_entry_load(&entry, new_load)];
        Ok(self.confirm_changes(action, params, changes, &message).await)
    }
}
