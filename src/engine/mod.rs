// ABOUTME: Action engine coordinating context, simulation, confirmation, and execution
// ABOUTME: Owns the single pending-action slot and the preview flags for simulate-and-confirm
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! # Action Engine
//!
//! Every schedule mutation goes through [`ActionEngine::simulate_and_confirm`]:
//!
//! 1. the changes are simulated against the current load series
//! 2. affected entries and days are tagged for preview
//! 3. the confirmation surface is awaited
//! 4. preview tags are cleared in one sweep
//! 5. on acceptance the executor applies the changes and a debounced
//!    analytics refresh is scheduled
//!
//! At most one action is pending. Starting a new preview supersedes the old
//! one: its confirmation still resolves, but nothing is applied.

mod actions;
mod adoption;
mod executor;
mod feedback;
mod intensity;
mod lifecycle;
mod requests;
mod shift;

pub use actions::{contextual_actions, ActionRequest, ContextualAction, Metric};
pub use adoption::{resolve_proposal, ResolvedProposal};
pub use executor::{ExecutionReport, Executor, ExecutorAction};
pub use intensity::{estimate_load, step_intensity, Boundary, IntensityDirection, IntensityStep};
pub use lifecycle::{
    ActionLifecycleRecord, ActionOutcome, ActionParams, LifecyclePhase, PreviewFlags,
    PreviewTarget,
};
pub use requests::{ActionResult, Scenario};
pub use shift::{plan_shift, Direction, ShiftPlan};

use crate::analytics::AnalyticsRefresher;
use crate::collaborators::{ConfirmationRequest, Severity};
use crate::commands::parse_command;
use crate::config::EngineSettings;
use crate::context::{ActionContext, EngineDependencies};
use crate::errors::{AppError, AppResult, EngineError, ErrorCode};
use forge_core::models::{ChangeDescriptor, EquipmentProfile};
use forge_intelligence::{
    AnalyticsSnapshot, ImpactSimulator, MonitorReport, PerformanceHistory, ProposalGenerator,
    ThresholdMonitor,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Default)]
struct EngineState {
    context: ActionContext,
    pending: Option<ActionLifecycleRecord>,
    preview: PreviewFlags,
    generation: u64,
    equipment: EquipmentProfile,
    performance: PerformanceHistory,
}

/// Decision-support engine for one open program
pub struct ActionEngine {
    deps: EngineDependencies,
    settings: EngineSettings,
    simulator: ImpactSimulator,
    generator: ProposalGenerator,
    monitor: Arc<ThresholdMonitor>,
    refresher: AnalyticsRefresher,
    state: Mutex<EngineState>,
}

impl ActionEngine {
    /// Build an engine from its collaborators
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` fail validation
    pub fn new(deps: EngineDependencies, settings: EngineSettings) -> Result<Self, EngineError> {
        settings.validate()?;
        let simulator = ImpactSimulator::new(deps.history().clone());
        let generator = ProposalGenerator::new(simulator.clone(), settings.proposals);
        let monitor = Arc::new(
            ThresholdMonitor::new(settings.thresholds, generator.clone())
                .with_max_displayed(settings.max_displayed_proposals),
        );
        let refresher = AnalyticsRefresher::new(
            Arc::clone(deps.schedule()),
            Arc::clone(deps.notifier()),
            Arc::clone(&monitor),
            deps.history().clone(),
            settings.debounce(),
        );
        info!(
            history_days = deps.history().len(),
            high_acwr = settings.thresholds.high_acwr,
            "action engine ready"
        );
        Ok(Self {
            deps,
            settings,
            simulator,
            generator,
            monitor,
            refresher,
            state: Mutex::new(EngineState::default()),
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("engine state lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Replace the current selection
    pub fn update_context(&self, context: ActionContext) {
        self.lock_state().context = context;
    }

    /// Current selection
    #[must_use]
    pub fn context(&self) -> ActionContext {
        self.lock_state().context.clone()
    }

    /// Actions offered for the current selection
    #[must_use]
    pub fn get_contextual_actions(&self) -> Vec<ContextualAction> {
        let context = self.context();
        contextual_actions(&context, self.deps.schedule().as_ref())
    }

    /// Run a contextual action
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying request
    pub async fn invoke(&self, action: &ContextualAction) -> AppResult<ActionResult> {
        self.run(action.request.clone()).await
    }

    /// Parse free text, notifying the user when it is not understood
    #[must_use]
    pub fn parse_command(&self, text: &str) -> Option<ActionRequest> {
        if let Some(parsed) = parse_command(text) {
            return Some(parsed.request);
        }
        self.surface(EngineError::UnrecognizedCommand(text.trim().to_owned()).into());
        None
    }

    /// Parse and run free text
    ///
    /// # Errors
    ///
    /// Propagates errors from the matched request
    pub async fn process_command(&self, text: &str) -> AppResult<Option<ActionResult>> {
        let Some(request) = self.parse_command(text) else {
            return Ok(None);
        };
        self.run(request).await.map(Some)
    }

    /// Preview `changes`, await confirmation, then execute `action`
    ///
    /// # Errors
    ///
    /// Returns an error, after notifying, when `action` has no executor handler
    pub async fn simulate_and_confirm(
        &self,
        action: &str,
        params: ActionParams,
        changes: Vec<ChangeDescriptor>,
        message: &str,
    ) -> AppResult<ActionOutcome> {
        let action = action
            .parse::<ExecutorAction>()
            .map_err(|e| self.surface(e.into()))?;
        Ok(self.preview_and_confirm(action, params, changes, message).await)
    }

    async fn preview_and_confirm(
        &self,
        action: ExecutorAction,
        params: ActionParams,
        changes: Vec<ChangeDescriptor>,
        message: &str,
    ) -> ActionOutcome {
        let current = self.deps.schedule().load_series();
        let impact = self.simulator.simulate(&changes, &current);
        let change_count = changes.len();
        let action_id = Uuid::new_v4();

        let (generation, superseded, tagged) = {
            let mut state = self.lock_state();
            let superseded = state.pending.take().map(|record| record.action);
            if superseded.is_some() {
                state.preview.clear_all();
            }
            state.generation = state.generation.wrapping_add(1);
            let tagged = state.preview.tag_changes(&changes);
            state.pending = Some(ActionLifecycleRecord {
                id: action_id,
                action,
                params,
                change_description: changes,
                impact,
                phase: LifecyclePhase::Previewing,
            });
            (state.generation, superseded, tagged)
        };

        info!(action_id = %action_id, action = %action, generation, change_count, "preview opened");
        if let Some(previous) = superseded {
            info!(previous = %previous, next = %action, "pending preview superseded");
            if let Some(surface) = self.deps.preview() {
                surface.clear_all();
            }
        }
        if let Some(surface) = self.deps.preview() {
            surface.highlight(&tagged);
        }
        self.deps.notifier().notify(
            &format!("Impact preview: {impact}"),
            Severity::Info,
            self.settings.impact_notice_ms,
        );

        let request = ConfirmationRequest {
            message: message.to_owned(),
            details: impact.to_string(),
            impact,
            change_count,
        };
        let confirmed = self.deps.confirmation().confirm(request).await;

        let record = {
            let mut state = self.lock_state();
            if state.generation == generation {
                state.preview.clear_all();
                state.pending.take()
            } else {
                None
            }
        };
        let Some(mut record) = record else {
            info!(action_id = %action_id, action = %action, "confirmation for superseded preview ignored");
            return ActionOutcome::cancelled(action, impact, "Superseded by a newer preview.");
        };
        if let Some(surface) = self.deps.preview() {
            surface.clear_all();
        }

        if !confirmed {
            record.phase = LifecyclePhase::Cancelled;
            info!(action_id = %record.id, action = %action, "action cancelled");
            self.notify("Action cancelled.", Severity::Info);
            return ActionOutcome::cancelled(action, impact, "Action cancelled.");
        }

        record.phase = LifecyclePhase::Confirmed;
        let executor = Executor::new(self.deps.schedule().as_ref(), self.deps.applier().as_ref());
        let report = executor.execute(action, &record.params, &record.change_description);
        info!(action_id = %record.id, applied = report.applied, "confirmed action applied");
        self.notify(&report.message, report.severity);
        if report.applied > 0 {
            self.refresher.schedule();
        }

        ActionOutcome {
            action,
            phase: record.phase,
            impact,
            applied: report.applied,
            skipped: report.skipped,
            message: report.message,
            severity: report.severity,
        }
    }

    /// Analytics for the current schedule
    #[must_use]
    pub fn snapshot(&self) -> AnalyticsSnapshot {
        AnalyticsSnapshot::compute(self.deps.history(), &self.deps.schedule().load_series())
    }

    /// Run the threshold monitor now
    #[must_use]
    pub fn check_thresholds(&self) -> MonitorReport {
        self.refresher.refresh_now()
    }

    /// Tell the engine the schedule changed outside of it
    pub fn schedule_changed(&self) {
        self.refresher.schedule();
    }

    /// Phase of the pending action, `Idle` when none
    #[must_use]
    pub fn lifecycle_phase(&self) -> LifecyclePhase {
        self.lock_state()
            .pending
            .as_ref()
            .map_or(LifecyclePhase::Idle, |record| record.phase)
    }

    /// The pending action, if a preview is open
    #[must_use]
    pub fn pending_action(&self) -> Option<ActionLifecycleRecord> {
        self.lock_state().pending.clone()
    }

    /// Targets currently tagged for preview
    #[must_use]
    pub fn preview_flags(&self) -> HashSet<PreviewTarget> {
        self.lock_state().preview.snapshot()
    }

    /// Equipment profile used for swap suggestions
    #[must_use]
    pub fn equipment_profile(&self) -> EquipmentProfile {
        self.lock_state().equipment
    }

    /// Analytics refresher
    #[must_use]
    pub const fn refresher(&self) -> &AnalyticsRefresher {
        &self.refresher
    }

    /// Threshold monitor
    #[must_use]
    pub fn monitor(&self) -> &ThresholdMonitor {
        &self.monitor
    }

    /// Proposal generator
    #[must_use]
    pub const fn generator(&self) -> &ProposalGenerator {
        &self.generator
    }

    /// Engine settings
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Show user-facing errors, log the rest, and hand the error back
    fn surface(&self, error: AppError) -> AppError {
        if error.code.is_user_facing() {
            let severity = match error.code {
                ErrorCode::UnknownAction | ErrorCode::MutationFailed => Severity::Error,
                _ => Severity::Warning,
            };
            self.notify(&error.message, severity);
        } else {
            warn!(code = ?error.code, error = %error.message, "engine error not shown to user");
        }
        error
    }

    fn notify(&self, message: &str, severity: Severity) {
        let duration = match severity {
            Severity::Error | Severity::Warning => self.settings.impact_notice_ms,
            Severity::Info | Severity::Success => self.settings.notice_ms,
        };
        self.deps.notifier().notify(message, severity, duration);
    }
}
