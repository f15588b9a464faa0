// ABOUTME: Action requests the engine can run and the contextual action catalog
// ABOUTME: Maps the current selection to the set of actions offered to the user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::intensity::IntensityDirection;
use super::shift::Direction;
use crate::collaborators::ScheduleAccessor;
use crate::context::{ActionContext, PhaseRef, Selection};
use forge_core::models::{DaySlot, EntryId, EquipmentProfile, ScheduleEntry, ScheduleScope};
use forge_intelligence::exercise::SwapReason;
use forge_intelligence::Proposal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric an optimize request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Acute:chronic workload ratio
    Acwr,
    /// Weekly monotony
    Monotony,
    /// Weekly strain
    Strain,
}

impl Metric {
    /// Parse a metric keyword
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "acwr" => Some(Self::Acwr),
            "monotony" => Some(Self::Monotony),
            "strain" => Some(Self::Strain),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acwr => f.write_str("ACWR"),
            Self::Monotony => f.write_str("Monotony"),
            Self::Strain => f.write_str("Strain"),
        }
    }
}

/// Everything the engine can be asked to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ActionRequest {
    /// Alternatives for an exercise
    SuggestSwap {
        /// Exercise to replace
        exercise_name: String,
        /// Why a swap is wanted
        reason: SwapReason,
    },
    /// Whether an exercise has been used long enough to rotate
    CheckRotation {
        /// Exercise to check
        exercise_name: String,
    },
    /// Tempo prescription ideas
    AddTempo {
        /// Exercise to annotate
        exercise_name: String,
    },
    /// Progressive overload ideas
    SuggestProgression {
        /// Exercise to progress
        exercise_name: String,
    },
    /// Change the equipment profile used for swaps
    SetEquipmentProfile {
        /// New profile
        profile: EquipmentProfile,
    },
    /// The athlete missed a session on a day
    MissedSession {
        /// Missed day
        slot: DaySlot,
    },
    /// Remove all entries in a week
    ClearWeek {
        /// Week to clear
        week: u32,
    },
    /// Remove all entries on a day
    ClearDay {
        /// Day to clear
        slot: DaySlot,
    },
    /// Move a week's entries
    ShiftWeek {
        /// Week to move
        week: u32,
        /// Direction
        direction: Direction,
        /// Distance in days
        days: u32,
    },
    /// Move a day's entries
    ShiftDay {
        /// Day to move
        slot: DaySlot,
        /// Direction
        direction: Direction,
        /// Distance in days
        days: u32,
    },
    /// Scale every entry in a week down
    ReduceLoad {
        /// Week to scale
        week: u32,
        /// Reduction in percent
        percentage: f64,
    },
    /// Clear a day as a rest day
    ConvertToRestDay {
        /// Day to clear
        slot: DaySlot,
    },
    /// Propose fixes for one metric
    Optimize {
        /// Metric to fix
        metric: Metric,
    },
    /// Step one entry's intensity
    ChangeIntensity {
        /// Entry to adjust
        entry: EntryId,
        /// Up or down
        direction: IntensityDirection,
    },
    /// What-if scenarios for one entry
    SimulateEntry {
        /// Entry to analyze
        entry: EntryId,
    },
    /// What-if for resting a whole day
    SimulateDay {
        /// Day to analyze
        slot: DaySlot,
    },
    /// Remove a placeholder entry
    RemovePlaceholder {
        /// Placeholder to remove
        entry: EntryId,
    },
    /// Remove everything in a phase
    ClearPhase {
        /// Phase to clear
        phase: PhaseRef,
    },
    /// Smooth week-to-week progression across a phase
    OptimizePhase {
        /// Phase to smooth
        phase: PhaseRef,
    },
    /// Preview and apply a generated proposal
    AdoptProposal {
        /// Proposal to adopt
        proposal: Box<Proposal>,
    },
    /// Record how hard a session felt
    RecordFeedback {
        /// Exercise the feedback is for
        exercise_name: String,
        /// Session RPE, 1-10
        rpe: f64,
        /// Reps actually completed
        reps_completed: u32,
    },
    /// Scale one entry's load by a recommended percentage
    ApplyFeedback {
        /// Entry to adjust
        entry: EntryId,
        /// Signed change in percent
        percentage: f64,
    },
    /// Check whether a deload week is due
    CheckDeload,
}

impl ActionRequest {
    /// Stable name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SuggestSwap { .. } => "suggestSwap",
            Self::CheckRotation { .. } => "checkRotation",
            Self::AddTempo { .. } => "addTempo",
            Self::SuggestProgression { .. } => "suggestProgression",
            Self::SetEquipmentProfile { .. } => "setEquipmentProfile",
            Self::MissedSession { .. } => "missedSession",
            Self::ClearWeek { .. } => "clearWeek",
            Self::ClearDay { .. } => "clearDay",
            Self::ShiftWeek { .. } => "shiftWeek",
            Self::ShiftDay { .. } => "shiftDay",
            Self::ReduceLoad { .. } => "reduceLoad",
            Self::ConvertToRestDay { .. } => "convertToRestDay",
            Self::Optimize { .. } => "optimize",
            Self::ChangeIntensity { .. } => "changeIntensity",
            Self::SimulateEntry { .. } => "simulateEntry",
            Self::SimulateDay { .. } => "simulateDay",
            Self::RemovePlaceholder { .. } => "removePlaceholder",
            Self::ClearPhase { .. } => "clearPhase",
            Self::OptimizePhase { .. } => "optimizePhase",
            Self::AdoptProposal { .. } => "adoptProposal",
            Self::RecordFeedback { .. } => "recordFeedback",
            Self::ApplyFeedback { .. } => "applyFeedback",
            Self::CheckDeload => "checkDeload",
        }
    }
}

/// One menu item offered for the current selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualAction {
    /// Stable identifier
    pub id: String,
    /// Short label
    pub label: String,
    /// One-line explanation
    pub description: String,
    /// What invoking the item runs
    pub request: ActionRequest,
}

impl ContextualAction {
    fn new(id: &str, label: &str, description: impl Into<String>, request: ActionRequest) -> Self {
        Self {
            id: id.to_owned(),
            label: label.to_owned(),
            description: description.into(),
            request,
        }
    }
}

/// Actions available for `context`, in display order
#[must_use]
pub fn contextual_actions(
    context: &ActionContext,
    schedule: &dyn ScheduleAccessor,
) -> Vec<ContextualAction> {
    let mut actions = Vec::new();
    if let Some(selection) = &context.selected {
        match selection {
            Selection::Entry(id) => {
                if let Some(entry) = schedule.entry(id) {
                    actions.extend(entry_actions(&entry));
                }
            }
            Selection::Day(slot) => {
                let has_entries = !schedule
                    .entries_in(ScheduleScope::Day { slot: *slot })
                    .is_empty();
                actions.extend(day_actions(*slot, has_entries));
            }
            Selection::Phase(phase) => actions.extend(phase_actions(phase)),
        }
    }
    actions
}

fn entry_actions(entry: &ScheduleEntry) -> Vec<ContextualAction> {
    let name = &entry.exercise_name;
    if entry.is_placeholder() {
        return vec![ContextualAction::new(
            "remove_placeholder",
            "Remove placeholder",
            format!("Delete the {name} placeholder"),
            ActionRequest::RemovePlaceholder {
                entry: entry.id.clone(),
            },
        )];
    }

    let mut actions = vec![ContextualAction::new(
        "analyze_impact",
        "Analyze impact",
        format!("Compare removing {name} or changing its load by 15%"),
        ActionRequest::SimulateEntry {
            entry: entry.id.clone(),
        },
    )];
    if entry.prescription.is_some() {
        actions.push(ContextualAction::new(
            "increase_intensity",
            "Increase intensity",
            format!("Step {name} intensity up one increment"),
            ActionRequest::ChangeIntensity {
                entry: entry.id.clone(),
                direction: IntensityDirection::Increase,
            },
        ));
        actions.push(ContextualAction::new(
            "decrease_intensity",
            "Decrease intensity",
            format!("Step {name} intensity down one increment"),
            ActionRequest::ChangeIntensity {
                entry: entry.id.clone(),
                direction: IntensityDirection::Decrease,
            },
        ));
    }
    actions.push(ContextualAction::new(
        "suggest_swap",
        "Suggest alternatives",
        format!("Exercises that train the same muscles as {name}"),
        ActionRequest::SuggestSwap {
            exercise_name: name.clone(),
            reason: SwapReason::Variation,
        },
    ));
    actions.push(ContextualAction::new(
        "suggest_progression",
        "Suggest progression",
        format!("Progressive overload options for {name}"),
        ActionRequest::SuggestProgression {
            exercise_name: name.clone(),
        },
    ));
    actions
}

fn day_actions(slot: DaySlot, has_entries: bool) -> Vec<ContextualAction> {
    let mut actions = vec![ContextualAction::new(
        "simulate_rest",
        "What if rest?",
        format!("Predict the effect of resting on {slot}"),
        ActionRequest::SimulateDay { slot },
    )];
    if has_entries {
        actions.extend([
            ContextualAction::new(
                "missed_session",
                "Athlete missed this",
                format!("Shift {slot} forward one day"),
                ActionRequest::MissedSession { slot },
            ),
            ContextualAction::new(
                "shift_day_forward",
                "Shift forward",
                format!("Move {slot} one day later"),
                ActionRequest::ShiftDay {
                    slot,
                    direction: Direction::Forward,
                    days: 1,
                },
            ),
            ContextualAction::new(
                "convert_to_rest",
                "Convert to rest day",
                format!("Remove every entry on {slot}"),
                ActionRequest::ConvertToRestDay { slot },
            ),
            ContextualAction::new(
                "clear_day",
                "Clear day",
                format!("Remove every entry on {slot}"),
                ActionRequest::ClearDay { slot },
            ),
        ]);
    }
    actions
}

fn phase_actions(phase: &PhaseRef) -> Vec<ContextualAction> {
    vec![
        ContextualAction::new(
            "optimize_phase",
            "Smooth progression",
            format!("Even out week-to-week load changes in {phase}"),
            ActionRequest::OptimizePhase {
                phase: phase.clone(),
            },
        ),
        ContextualAction::new(
            "clear_phase",
            "Clear phase",
            format!("Remove every entry in {phase}"),
            ActionRequest::ClearPhase {
                phase: phase.clone(),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use forge_core::models::{EntryKind, LoadSeries, LoadType, Prescription};

    struct OneEntry(ScheduleEntry);

    impl ScheduleAccessor for OneEntry {
        fn load_series(&self) -> LoadSeries {
            LoadSeries::default()
        }
        fn total_weeks(&self) -> u32 {
            4
        }
        fn entries_in(&self, scope: ScheduleScope) -> Vec<ScheduleEntry> {
            if scope.contains(self.0.slot) {
                vec![self.0.clone()]
            } else {
                Vec::new()
            }
        }
        fn entry(&self, id: &EntryId) -> Option<ScheduleEntry> {
            (id == &self.0.id).then(|| self.0.clone())
        }
    }

    fn squat(kind: EntryKind) -> ScheduleEntry {
        ScheduleEntry {
            id: EntryId::new("sq"),
            slot: DaySlot::new(1, Weekday::Mon),
            exercise_name: "Back Squat".into(),
            exercise_id: None,
            kind,
            load: 400.0,
            prescription: Some(Prescription {
                load_type: LoadType::Rpe,
                value: 8.0,
            }),
            sets: Some(5),
            reps: Some(5),
        }
    }

    fn ids(actions: &[ContextualAction]) -> Vec<&str> {
        actions.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_entry_selection_offers_intensity_and_swaps() {
        let schedule = OneEntry(squat(EntryKind::Exercise));
        let context = ActionContext::focused(Selection::Entry(EntryId::new("sq")));
        let actions = contextual_actions(&context, &schedule);
        assert_eq!(
            ids(&actions),
            vec![
                "analyze_impact",
                "increase_intensity",
                "decrease_intensity",
                "suggest_swap",
                "suggest_progression"
            ]
        );
    }

    #[test]
    fn test_placeholder_only_offers_removal() {
        let schedule = OneEntry(squat(EntryKind::Placeholder));
        let context = ActionContext::focused(Selection::Entry(EntryId::new("sq")));
        assert_eq!(ids(&contextual_actions(&context, &schedule)), vec!["remove_placeholder"]);
    }

    #[test]
    fn test_empty_day_only_offers_simulation() {
        let schedule = OneEntry(squat(EntryKind::Exercise));
        let empty = ActionContext::focused(Selection::Day(DaySlot::new(2, Weekday::Fri)));
        assert_eq!(ids(&contextual_actions(&empty, &schedule)), vec!["simulate_rest"]);

        let busy = ActionContext::focused(Selection::Day(DaySlot::new(1, Weekday::Mon)));
        assert!(ids(&contextual_actions(&busy, &schedule)).contains(&"convert_to_rest"));
    }

    #[test]
    fn test_no_selection_yields_no_actions() {
        let schedule = OneEntry(squat(EntryKind::Exercise));
        assert!(contextual_actions(&ActionContext::default(), &schedule).is_empty());
    }

    #[test]
    fn test_request_serializes_with_action_tag() {
        let request = ActionRequest::ClearWeek { week: 3 };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["action"], "clearWeek");
        assert_eq!(json["week"], 3);
    }
}
