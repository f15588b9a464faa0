// ABOUTME: Dispatches action requests to their handlers on the action engine
// ABOUTME: Builds change descriptors for mutating requests and advisory results for the rest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::actions::{ActionRequest, Metric};
use super::adoption::resolve_proposal;
use super::executor::ExecutorAction;
use super::intensity::{estimate_load, step_intensity, IntensityDirection, IntensityStep};
use super::lifecycle::{ActionOutcome, ActionParams};
use super::shift::{plan_shift, Direction};
use super::ActionEngine;
use crate::collaborators::Severity;
use crate::context::PhaseRef;
use crate::errors::{AppError, AppResult};
use forge_core::models::{
    Change, ChangeDescriptor, DaySlot, EntryId, EquipmentProfile, LoadSeries, ScheduleScope,
};
use forge_intelligence::exercise::{
    check_rotation, suggest_progression, suggest_swaps, ProgressionPlan, RotationAdvice,
    SwapReason, SwapSuggestion, TrainingGoal,
};
use forge_intelligence::{
    AnalyticsSnapshot, DeloadAssessment, LoadAdjustment, PredictedImpact, Proposal,
    ProposalContext, Trigger,
};
use serde::Serialize;
use tracing::debug;

/// Load change explored by the entry what-if
const ENTRY_WHAT_IF_PERCENT: f64 = 15.0;

/// One what-if scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// What the scenario changes
    pub label: String,
    /// Simulated effect
    pub impact: PredictedImpact,
}

/// What running a request produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "camelCase")]
pub enum ActionResult {
    /// A mutating action went through preview and confirmation
    Completed(ActionOutcome),
    /// Remediation proposals
    Proposals(Vec<Proposal>),
    /// Exercise alternatives
    Swaps(Vec<SwapSuggestion>),
    /// Progression ideas
    Progression(ProgressionPlan),
    /// Rotation advice
    Rotation(RotationAdvice),
    /// What-if scenarios
    Scenarios(Vec<Scenario>),
    /// Load recommendation from session feedback
    Feedback(LoadAdjustment),
    /// Deload check
    Deload(DeloadAssessment),
    /// Informational outcome, already shown to the user
    Info(String),
}

fn entries_label(count: usize) -> String {
    if count == 1 {
        "1 entry".to_owned()
    } else {
        format!("{count} entries")
    }
}

fn days_label(days: u32) -> String {
    if days == 1 {
        "1 day".to_owned()
    } else {
        format!("{days} days")
    }
}

impl ActionEngine {
    /// Run one request to completion
    ///
    /// # Errors
    ///
    /// Returns an error for invalid request parameters
    pub async fn run(&self, request: ActionRequest) -> AppResult<ActionResult> {
        debug!(request = request.name(), "running action request");
        Ok(match request {
            ActionRequest::ClearWeek { week } => {
                self.clear_scope(ExecutorAction::ClearWeek, ScheduleScope::Week { week }, None)
                    .await
            }
            ActionRequest::ClearDay { slot } => {
                self.clear_scope(ExecutorAction::ClearDay, ScheduleScope::Day { slot }, None)
                    .await
            }
            ActionRequest::ClearPhase { phase } => {
                self.clear_scope(ExecutorAction::ClearPhase, phase.scope(), Some(&phase))
                    .await
            }
            ActionRequest::ShiftWeek {
                week,
                direction,
                days,
            } => {
                self.shift(ScheduleScope::Week { week }, direction, days, false)
                    .await
            }
            ActionRequest::ShiftDay {
                slot,
                direction,
                days,
            } => {
                self.shift(ScheduleScope::Day { slot }, direction, days, false)
                    .await
            }
            ActionRequest::MissedSession { slot } => {
                self.shift(ScheduleScope::Day { slot }, Direction::Forward, 1, true)
                    .await
            }
            ActionRequest::ReduceLoad { week, percentage } => {
                self.reduce_week(week, percentage).await?
            }
            ActionRequest::ConvertToRestDay { slot } => self.convert_to_rest(slot).await,
            ActionRequest::RemovePlaceholder { entry } => self.remove_placeholder(&entry).await,
            ActionRequest::ChangeIntensity { entry, direction } => {
                self.change_intensity(&entry, direction).await
            }
            ActionRequest::AdoptProposal { proposal } => self.adopt_proposal(&proposal).await,
            ActionRequest::Optimize { metric } => self.optimize(metric),
            ActionRequest::OptimizePhase { phase } => self.optimize_phase(&phase),
            ActionRequest::SimulateEntry { entry } => self.simulate_entry(&entry),
            ActionRequest::SimulateDay { slot } => self.simulate_day(slot),
            ActionRequest::SuggestSwap {
                exercise_name,
                reason,
            } => self.suggest_swap(&exercise_name, reason),
            ActionRequest::CheckRotation { exercise_name } => self.rotation(&exercise_name),
            ActionRequest::AddTempo { exercise_name } => self.tempo(&exercise_name),
            ActionRequest::SuggestProgression { exercise_name } => {
                self.progression(&exercise_name)
            }
            ActionRequest::SetEquipmentProfile { profile } => self.set_equipment(profile),
            ActionRequest::RecordFeedback {
                exercise_name,
                rpe,
                reps_completed,
            } => ActionResult::Feedback(self.record_feedback(
                &exercise_name,
                rpe,
                reps_completed,
            )?),
            ActionRequest::ApplyFeedback { entry, percentage } => {
                self.apply_feedback(&entry, percentage).await?
            }
            ActionRequest::CheckDeload => ActionResult::Deload(self.detect_deload_need()),
        })
    }

    pub(super) fn inform(&self, message: String, severity: Severity) -> ActionResult {
        self.notify(&message, severity);
        ActionResult::Info(message)
    }

    pub(super) async fn confirm_changes(
        &self,
        action: ExecutorAction,
        params: ActionParams,
        changes: Vec<ChangeDescriptor>,
        message: &str,
    ) -> ActionResult {
        ActionResult::Completed(self.preview_and_confirm(action, params, changes, message).await)
    }

    async fn clear_scope(
        &self,
        action: ExecutorAction,
        scope: ScheduleScope,
        phase: Option<&PhaseRef>,
    ) -> ActionResult {
        let entries = self.deps.schedule().entries_in(scope);
        if entries.is_empty() {
            return self.inform(format!("No entries found in {scope} to clear."), Severity::Info);
        }
        let changes: Vec<_> = entries.iter().map(ChangeDescriptor::remove_entry).collect();
        let count = entries_label(changes.len());
        let mut params = ActionParams::scoped(scope);
        if let Some(phase) = phase {
            params = params.with_subject(phase.name.clone());
        }
        let message = phase.map_or_else(
            || format!("Clear {count} from {scope}?"),
            |phase| format!("Clear {count} from phase {phase}?"),
        );
        self.confirm_changes(action, params, changes, &message).await
    }

    async fn shift(
        &self,
        scope: ScheduleScope,
        direction: Direction,
        days: u32,
        missed: bool,
    ) -> ActionResult {
        let action = if matches!(scope, ScheduleScope::Day { .. }) {
            ExecutorAction::ShiftDay
        } else {
            ExecutorAction::ShiftWeek
        };
        let entries = self.deps.schedule().entries_in(scope);
        if entries.is_empty() {
            return self.inform(format!("No entries found in {scope} to shift."), Severity::Info);
        }
        if days == 0 {
            return self.inform(
                "Shift distance must be at least one day.".to_owned(),
                Severity::Warning,
            );
        }

        let total_weeks = self.deps.schedule().total_weeks();
        let plan = plan_shift(&entries, direction, days, total_weeks);
        if plan.moves.is_empty() {
            return self.inform(
                format!(
                    "No entries in {scope} could be shifted: every target falls outside weeks 1-{total_weeks}."
                ),
                Severity::Warning,
            );
        }

        let count = entries_label(plan.moves.len());
        let message = if missed {
            format!("Athlete missed {scope}. Shift {count} forward 1 day?")
        } else {
            format!("Shift {count} in {scope} {direction} {}?", days_label(days))
        };
        let params = ActionParams::scoped(scope).with_skipped(plan.skipped.len());
        self.confirm_changes(action, params, plan.moves, &message).await
    }

    async fn reduce_week(&self, week: u32, percentage: f64) -> AppResult<ActionResult> {
        if percentage.is_nan() || percentage <= 0.0 || percentage > 100.0 {
            return Err(self.surface(AppError::invalid_input(format!(
                "Reduction must be between 0 and 100 percent, got {percentage}."
            ))));
        }

        let scope = ScheduleScope::Week { week };
        let factor = 1.0 - percentage / 100.0;
        let changes: Vec<_> = self
            .deps
            .schedule()
            .entries_in(scope)
            .iter()
            .filter(|entry| entry.load > 0.0)
            .filter_map(|entry| {
                let reduced = (entry.load * factor).round().max(0.0);
                ((reduced - entry.load).abs() >= 1.0)
                    .then(|| ChangeDescriptor::modify_entry_load(entry, reduced))
            })
            .collect();
        if changes.is_empty() {
            return Ok(self.inform(format!("Week {week} has no load to reduce."), Severity::Info));
        }

        let message = format!(
            "Reduce load in week {week} by {percentage}% across {}?",
            entries_label(changes.len())
        );
        let params = ActionParams::scoped(scope).with_percentage(-percentage);
        Ok(self
            .confirm_changes(ExecutorAction::ApplyLoadReduction, params, changes, &message)
            .await)
    }

    async fn convert_to_rest(&self, slot: DaySlot) -> ActionResult {
        let scope = ScheduleScope::Day { slot };
        let entries = self.deps.schedule().entries_in(scope);
        if entries.is_empty() {
            return self.inform(format!("{slot} is already a rest day."), Severity::Info);
        }
        let changes: Vec<_> = entries.iter().map(ChangeDescriptor::remove_entry).collect();
        let message = format!(
            "Convert {slot} to a rest day ({} removed)?",
            entries_label(changes.len())
        );
        self.confirm_changes(
            ExecutorAction::ApplyRestDay,
            ActionParams::scoped(scope),
            changes,
            &message,
        )
        .await
    }

    async fn remove_placeholder(&self, id: &EntryId) -> ActionResult {
        let Some(entry) = self.deps.schedule().entry(id) else {
            return self.inform(format!("Entry {id} no longer exists."), Severity::Warning);
        };
        if !entry.is_placeholder() {
            return self.inform(
                format!("{} is not a placeholder.", entry.exercise_name),
                Severity::Warning,
            );
        }
        let message = format!("Remove placeholder {} from {}?", entry.exercise_name, entry.slot);
        let params = ActionParams::scoped(ScheduleScope::Day { slot: entry.slot })
            .with_subject(entry.exercise_name.clone());
        self.confirm_changes(
            ExecutorAction::RemovePlaceholder,
            params,
            vec![ChangeDescriptor::remove_entry(&entry)],
            &message,
        )
        .await
    }

    async fn change_intensity(&self, id: &EntryId, direction: IntensityDirection) -> ActionResult {
        let Some(entry) = self.deps.schedule().entry(id) else {
            return self.inform(format!("Entry {id} no longer exists."), Severity::Warning);
        };
        let name = entry.exercise_name.clone();
        let Some(prescription) = entry.prescription else {
            return self.inform(
                format!("{name} has no intensity prescription to adjust."),
                Severity::Warning,
            );
        };

        let new_value = match step_intensity(prescription.load_type, prescription.value, direction)
        {
            IntensityStep::Changed(value) => value,
            IntensityStep::AtLimit(boundary) => {
                return self.inform(
                    format!(
                        "Intensity for {name} is already at its {boundary} limit for this adjustment type."
                    ),
                    Severity::Info,
                );
            }
            IntensityStep::Unsupported => {
                return self.inform(
                    format!(
                        "Cannot adjust intensity for load type {}.",
                        prescription.load_type.label()
                    ),
                    Severity::Warning,
                );
            }
        };

        let change = ChangeDescriptor {
            entry: Some(entry.id.clone()),
            slot: Some(entry.slot),
            load_index: None,
            change: Change::ModifyIntensity {
                load_type: prescription.load_type,
                original_value: prescription.value,
                new_value,
                original_load: entry.load,
                new_load: estimate_load(entry.load, prescription.value, new_value),
            },
        };
        let verb = match direction {
            IntensityDirection::Increase => "Increase",
            IntensityDirection::Decrease => "Decrease",
        };
        let message = format!(
            "{verb} {name} intensity from {} {} to {new_value}?",
            prescription.load_type.label(),
            prescription.value
        );
        let params = ActionParams::scoped(ScheduleScope::Day { slot: entry.slot }).with_subject(name);
        self.confirm_changes(ExecutorAction::ApplyIntensityChange, params, vec![change], &message)
            .await
    }

    /// Preview and apply a generated proposal against the live schedule
    async fn adopt_proposal(&self, proposal: &Proposal) -> ActionResult {
        if !proposal.is_actionable() {
            return self.inform(
                "No changes needed or possible for this suggestion.".to_owned(),
                Severity::Info,
            );
        }
        let Some(resolved) = resolve_proposal(proposal, self.deps.schedule().as_ref()) else {
            return self.inform(proposal.description.clone(), Severity::Info);
        };
        if resolved.changes.is_empty() {
            return self.inform(
                "No changes needed or possible for this suggestion.".to_owned(),
                Severity::Info,
            );
        }
        let message = format!("{}?", proposal.description.trim_end_matches('.'));
        self.confirm_changes(resolved.action, resolved.params, resolved.changes, &message)
            .await
    }

    fn current_snapshot(&self) -> (AnalyticsSnapshot, LoadSeries) {
        let series = self.deps.schedule().load_series();
        (AnalyticsSnapshot::compute(self.deps.history(), &series), series)
    }

    fn optimize(&self, metric: Metric) -> ActionResult {
        let (snapshot, series) = self.current_snapshot();
        let thresholds = *self.monitor.thresholds();

        let (trigger, value, threshold) = match metric {
            Metric::Acwr => match snapshot.acwr_ratio {
                None => {
                    return self.inform(
                        "ACWR needs at least 28 days of data.".to_owned(),
                        Severity::Info,
                    )
                }
                Some(ratio) if ratio > thresholds.high_acwr => {
                    (Trigger::HighAcwr, ratio, thresholds.high_acwr)
                }
                Some(ratio) if ratio < thresholds.low_acwr => {
                    (Trigger::LowLoad, ratio, thresholds.low_acwr)
                }
                Some(ratio) => {
                    return self.inform(
                        format!(
                            "ACWR {ratio:.2} is within {:.2}-{:.2}.",
                            thresholds.low_acwr, thresholds.high_acwr
                        ),
                        Severity::Info,
                    )
                }
            },
            Metric::Monotony => match snapshot.monotony_value {
                None => {
                    return self.inform(
                        "Monotony needs a full week of data.".to_owned(),
                        Severity::Info,
                    )
                }
                Some(value) if value > thresholds.high_monotony => {
                    (Trigger::HighMonotony, value, thresholds.high_monotony)
                }
                Some(value) => {
                    return self.inform(
                        format!(
                            "Monotony {value:.2} is within threshold ({:.2}).",
                            thresholds.high_monotony
                        ),
                        Severity::Info,
                    )
                }
            },
            Metric::Strain => match snapshot.strain_value {
                None => {
                    return self.inform(
                        "Strain needs a full week of data.".to_owned(),
                        Severity::Info,
                    )
                }
                Some(value) if value > thresholds.high_strain => {
                    (Trigger::HighStrain, value, thresholds.high_strain)
                }
                Some(value) => {
                    return self.inform(
                        format!(
                            "Strain {value:.0} is within threshold ({:.0}).",
                            thresholds.high_strain
                        ),
                        Severity::Info,
                    )
                }
            },
        };

        let proposals = self
            .generator
            .propose(&trigger, &ProposalContext::new(&series));
        if proposals.is_empty() {
            self.notify(
                &format!("No {metric} proposals available for the current week."),
                Severity::Info,
            );
        } else {
            let relation = if value > threshold { '>' } else { '<' };
            let listed = proposals
                .iter()
                .take(self.settings.max_displayed_proposals)
                .map(|p| p.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            self.notify(
                &format!("{metric} {value:.2} {relation} {threshold:.2}. Suggested: {listed}"),
                Severity::Warning,
            );
        }
        ActionResult::Proposals(proposals)
    }

    fn optimize_phase(&self, phase: &PhaseRef) -> ActionResult {
        let series = self.deps.schedule().load_series();
        let proposals = self.generator.propose_phase_optimizations(
            &phase.name,
            phase.start_week,
            phase.end_week,
            &series,
        );
        if let Some(first) = proposals.first() {
            let severity = if first.is_actionable() {
                Severity::Warning
            } else {
                Severity::Info
            };
            self.notify(&first.description, severity);
        }
        ActionResult::Proposals(proposals)
    }

    fn simulate_entry(&self, id: &EntryId) -> ActionResult {
        let Some(entry) = self.deps.schedule().entry(id) else {
            return self.inform(format!("Entry {id} no longer exists."), Severity::Warning);
        };
        let current = self.deps.schedule().load_series();
        let name = &entry.exercise_name;
        let factor = ENTRY_WHAT_IF_PERCENT / 100.0;
        let variants = [
            (format!("Remove {name}"), ChangeDescriptor::remove_entry(&entry)),
            (
                format!("Reduce {name} by {ENTRY_WHAT_IF_PERCENT}%"),
                ChangeDescriptor::modify_entry_load(&entry, (entry.load * (1.0 - factor)).round()),
            ),
            (
                format!("Increase {name} by {ENTRY_WHAT_IF_PERCENT}%"),
                ChangeDescriptor::modify_entry_load(&entry, (entry.load * (1.0 + factor)).round()),
            ),
        ];
        let scenarios: Vec<Scenario> = variants
            .into_iter()
            .map(|(label, change)| Scenario {
                impact: self.simulator.simulate(&[change], &current),
                label,
            })
            .collect();

        let summary = scenarios
            .iter()
            .map(|s| format!("{}: {}", s.label, s.impact))
            .collect::<Vec<_>>()
            .join(" | ");
        self.deps
            .notifier()
            .notify(&summary, Severity::Info, self.settings.impact_notice_ms);
        ActionResult::Scenarios(scenarios)
    }

    fn simulate_day(&self, slot: DaySlot) -> ActionResult {
        let current = self.deps.schedule().load_series();
        let load = slot
            .load_index()
            .and_then(|index| current.get(index))
            .unwrap_or_default();
        if load <= 0.0 {
            return self.inform(format!("{slot} is already a rest day."), Severity::Info);
        }
        let change = ChangeDescriptor::clear_day_load(slot, load);
        let scenario = Scenario {
            label: format!("Rest on {slot}"),
            impact: self.simulator.simulate(&[change], &current),
        };
        self.deps.notifier().notify(
            &format!("{}: {}", scenario.label, scenario.impact),
            Severity::Info,
            self.settings.impact_notice_ms,
        );
        ActionResult::Scenarios(vec![scenario])
    }

    fn suggest_swap(&self, exercise_name: &str, reason: SwapReason) -> ActionResult {
        let library = self.deps.exercises();
        let Some(base) = library
            .find_by_name(exercise_name)
            .and_then(|id| library.exercise(&id))
        else {
            return self.inform(
                format!("Exercise \"{exercise_name}\" not found in library."),
                Severity::Warning,
            );
        };

        let profile = self.equipment_profile();
        let swaps = suggest_swaps(&base, &library.catalog(), reason, profile);
        if swaps.is_empty() {
            return self.inform(
                format!(
                    "No suitable alternatives found for {} with {profile} equipment.",
                    base.name
                ),
                Severity::Info,
            );
        }
        let names = swaps
            .iter()
            .map(|s| s.exercise.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.notify(&format!("Alternatives for {}: {names}", base.name), Severity::Info);
        ActionResult::Swaps(swaps)
    }

    fn rotation(&self, exercise_name: &str) -> ActionResult {
        let weeks: Vec<u32> = self
            .deps
            .schedule()
            .entries_in(ScheduleScope::Program)
            .iter()
            .filter(|entry| entry.exercise_name.eq_ignore_ascii_case(exercise_name))
            .map(|entry| entry.slot.week)
            .collect();
        if weeks.is_empty() {
            return self.inform(
                format!("No scheduled entries for {exercise_name}."),
                Severity::Warning,
            );
        }

        let advice = check_rotation(&weeks);
        if advice.should_rotate {
            self.notify(
                &format!(
                    "{exercise_name} has been used for {} consecutive weeks. Consider rotating to a variation.",
                    advice.consecutive_weeks
                ),
                Severity::Warning,
            );
        } else {
            self.notify(
                &format!(
                    "{exercise_name}: {} consecutive weeks, no rotation needed yet.",
                    advice.consecutive_weeks
                ),
                Severity::Info,
            );
        }
        ActionResult::Rotation(advice)
    }

    fn tempo(&self, exercise_name: &str) -> ActionResult {
        let Some(entry) = self.deps.schedule().find_entry_by_exercise(exercise_name) else {
            return self.inform(
                format!("No scheduled entry for {exercise_name}."),
                Severity::Warning,
            );
        };
        let tempo = match TrainingGoal::from_reps(entry.reps.unwrap_or_default()) {
            TrainingGoal::Strength => "2-1-X-0 (controlled descent, explosive drive)",
            TrainingGoal::Hypertrophy => "3-1-1-0 (slow eccentric, brief pause)",
            TrainingGoal::Endurance => "2-0-2-0 (steady continuous tension)",
        };
        self.inform(
            format!("Suggested tempo for {}: {tempo}", entry.exercise_name),
            Severity::Info,
        )
    }

    fn progression(&self, exercise_name: &str) -> ActionResult {
        let Some(entry) = self.deps.schedule().find_entry_by_exercise(exercise_name) else {
            return self.inform(
                format!("No scheduled entry for {exercise_name}."),
                Severity::Warning,
            );
        };
        let plan = suggest_progression(
            &entry.exercise_name,
            entry.prescription,
            entry.sets,
            entry.reps,
        );
        self.notify(
            &format!(
                "Progression for {}: {}",
                entry.exercise_name,
                plan.suggestions.join("; ")
            ),
            Severity::Info,
        );
        ActionResult::Progression(plan)
    }

    fn set_equipment(&self, profile: EquipmentProfile) -> ActionResult {
        self.lock_state().equipment = profile;
        self.inform(
            format!("Equipment profile set to {profile}. Swap suggestions will use this equipment."),
            Severity::Success,
        )
    }
}
