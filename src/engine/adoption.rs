// ABOUTME: Turns a day-level proposal into entry-level changes the executor can apply
// ABOUTME: Scales each entry by the proposed day ratio and maps proposal kinds to executor actions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::executor::ExecutorAction;
use super::lifecycle::ActionParams;
use crate::collaborators::ScheduleAccessor;
use chrono::Weekday;
use forge_core::models::{Change, ChangeDescriptor, DaySlot, ScheduleEntry, ScheduleScope};
use forge_intelligence::{Proposal, ProposalKind};
use tracing::debug;

/// Changes ready for simulate-and-confirm
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProposal {
    /// Executor action to run
    pub action: ExecutorAction,
    /// Handler parameters
    pub params: ActionParams,
    /// Entry-level changes where entries exist, day-level otherwise
    pub changes: Vec<ChangeDescriptor>,
}

/// Resolve `proposal` against the live schedule.
///
/// Returns `None` for informational proposals.
#[must_use]
pub fn resolve_proposal(
    proposal: &Proposal,
    schedule: &dyn ScheduleAccessor,
) -> Option<ResolvedProposal> {
    let action = action_for(proposal)?;
    let mut params = proposal
        .target_week
        .map_or_else(ActionParams::default, |week| {
            ActionParams::scoped(ScheduleScope::Week { week })
        })
        .with_subject(proposal.description.clone());
    if let Some(percentage) = proposal.percentage {
        params = params.with_percentage(percentage);
    }

    let changes = if proposal.kind == ProposalKind::SwapDays {
        resolve_swap(proposal, schedule)
    } else {
        proposal
            .changes
            .iter()
            .flat_map(|change| resolve_change(change, schedule))
            .collect()
    };

    if let (ProposalKind::AddRestDay, Some(week), Some(day)) =
        (proposal.kind, proposal.target_week, proposal.target_day)
    {
        params.scope = Some(ScheduleScope::Day {
            slot: DaySlot::new(week, day),
        });
    }

    Some(ResolvedProposal {
        action,
        params,
        changes,
    })
}

fn action_for(proposal: &Proposal) -> Option<ExecutorAction> {
    Some(match proposal.kind {
        ProposalKind::ReduceLoad | ProposalKind::ReduceSpecificDay => {
            ExecutorAction::ApplyLoadReduction
        }
        ProposalKind::IncreaseLoad | ProposalKind::IncreaseLowDay => {
            ExecutorAction::ApplyLoadIncrease
        }
        ProposalKind::AddRestDay => ExecutorAction::ApplyRestDay,
        ProposalKind::SwapDays => ExecutorAction::ApplyDaySwap,
        ProposalKind::SmoothProgression => {
            if proposal.percentage.unwrap_or_default() < 0.0 {
                ExecutorAction::ApplyLoadReduction
            } else {
                ExecutorAction::ApplyLoadIncrease
            }
        }
        ProposalKind::Message => return None,
    })
}

fn loaded_entries(schedule: &dyn ScheduleAccessor, slot: DaySlot) -> Vec<ScheduleEntry> {
    schedule
        .entries_in(ScheduleScope::Day { slot })
        .into_iter()
        .filter(|entry| entry.load > 0.0)
        .collect()
}

fn resolve_change(change: &ChangeDescriptor, schedule: &dyn ScheduleAccessor) -> Vec<ChangeDescriptor> {
    let Some(slot) = change.slot.filter(|_| change.entry.is_none()) else {
        return vec![change.clone()];
    };
    let entries = loaded_entries(schedule, slot);
    if entries.is_empty() {
        debug!(%slot, "no entries to resolve, keeping day-level change");
        return vec![change.clone()];
    }

    match change.change {
        Change::ModifyLoad {
            original_load,
            new_load,
        } if original_load > 0.0 => {
            let ratio = new_load / original_load;
            entries
                .iter()
                .filter_map(|entry| {
                    let scaled = (entry.load * ratio).round().max(0.0);
                    ((scaled - entry.load).abs() >= 1.0)
                        .then(|| ChangeDescriptor::modify_entry_load(entry, scaled))
                })
                .collect()
        }
        Change::Remove { .. } => entries.iter().map(ChangeDescriptor::remove_entry).collect(),
        _ => vec![change.clone()],
    }
}

fn resolve_swap(proposal: &Proposal, schedule: &dyn ScheduleAccessor) -> Vec<ChangeDescriptor> {
    let (Some(week), Some(first), Some(second)) =
        (proposal.target_week, proposal.target_day, proposal.secondary_day)
    else {
        return proposal.changes.clone();
    };
    let slot = |day: Weekday| DaySlot::new(week, day);
    let first_entries = loaded_entries(schedule, slot(first));
    let second_entries = loaded_entries(schedule, slot(second));
    if first_entries.is_empty() && second_entries.is_empty() {
        return proposal.changes.clone();
    }

    first_entries
        .iter()
        .map(|entry| ChangeDescriptor::move_entry(entry, slot(second)))
        .chain(
            second_entries
                .iter()
                .map(|entry| ChangeDescriptor::move_entry(entry, slot(first))),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::models::{EntryId, EntryKind, LoadSeries};
    use forge_intelligence::PredictedImpact;

    struct Week1(Vec<ScheduleEntry>);

    impl ScheduleAccessor for Week1 {
        fn load_series(&self) -> LoadSeries {
            LoadSeries::default()
        }
        fn total_weeks(&self) -> u32 {
            1
        }
        fn entries_in(&self, scope: ScheduleScope) -> Vec<ScheduleEntry> {
            self.0.iter().filter(|e| scope.contains(e.slot)).cloned().collect()
        }
        fn entry(&self, id: &EntryId) -> Option<ScheduleEntry> {
            self.0.iter().find(|e| &e.id == id).cloned()
        }
    }

    fn entry(id: &str, day: Weekday, load: f64) -> ScheduleEntry {
        ScheduleEntry {
            id: EntryId::new(id),
            slot: DaySlot::new(1, day),
            exercise_name: id.to_uppercase(),
            exercise_id: None,
            kind: EntryKind::Exercise,
            load,
            prescription: None,
            sets: None,
            reps: None,
        }
    }

    fn proposal(kind: ProposalKind, changes: Vec<ChangeDescriptor>) -> Proposal {
        Proposal {
            kind,
            description: "test".into(),
            target_week: Some(1),
            target_day: Some(Weekday::Mon),
            secondary_day: Some(Weekday::Wed),
            percentage: Some(-20.0),
            changes,
            impact: PredictedImpact::neutral(),
            success: true,
        }
    }

    #[test]
    fn test_day_reduction_scales_each_entry() {
        let schedule = Week1(vec![entry("a", Weekday::Mon, 300.0), entry("b", Weekday::Mon, 100.0)]);
        let monday = DaySlot::new(1, Weekday::Mon);
        let p = proposal(
            ProposalKind::ReduceSpecificDay,
            vec![ChangeDescriptor::modify_day_load(monday, 400.0, 320.0)],
        );
        let resolved = resolve_proposal(&p, &schedule).unwrap();
        assert_eq!(resolved.action, ExecutorAction::ApplyLoadReduction);
        let loads: Vec<f64> = resolved
            .changes
            .iter()
            .map(|c| match c.change {
                Change::ModifyLoad { new_load, .. } => new_load,
                _ => f64::NAN,
            })
            .collect();
        assert_eq!(loads, vec![240.0, 80.0]);
        assert!(resolved.changes.iter().all(|c| c.entry.is_some()));
    }

    #[test]
    fn test_rest_day_removes_entries() {
        let schedule = Week1(vec![entry("a", Weekday::Mon, 300.0)]);
        let monday = DaySlot::new(1, Weekday::Mon);
        let p = proposal(
            ProposalKind::AddRestDay,
            vec![ChangeDescriptor::clear_day_load(monday, 300.0)],
        );
        let resolved = resolve_proposal(&p, &schedule).unwrap();
        assert_eq!(resolved.action, ExecutorAction::ApplyRestDay);
        assert_eq!(resolved.changes, vec![ChangeDescriptor::remove_entry(&schedule.0[0])]);
        assert_eq!(resolved.params.scope, Some(ScheduleScope::Day { slot: monday }));
    }

    #[test]
    fn test_swap_moves_entries_both_ways() {
        let schedule = Week1(vec![entry("a", Weekday::Mon, 300.0), entry("b", Weekday::Wed, 100.0)]);
        let p = proposal(ProposalKind::SwapDays, Vec::new());
        let resolved = resolve_proposal(&p, &schedule).unwrap();
        assert_eq!(resolved.changes.len(), 2);
        assert!(resolved.changes.iter().all(|c| matches!(c.change, Change::Move { .. })));
    }

    #[test]
    fn test_day_without_entries_keeps_day_level_change() {
        let schedule = Week1(Vec::new());
        let monday = DaySlot::new(1, Weekday::Mon);
        let change = ChangeDescriptor::modify_day_load(monday, 400.0, 320.0);
        let p = proposal(ProposalKind::ReduceSpecificDay, vec![change.clone()]);
        assert_eq!(resolve_proposal(&p, &schedule).unwrap().changes, vec![change]);
    }

    #[test]
    fn test_message_is_not_adoptable() {
        let schedule = Week1(Vec::new());
        assert!(resolve_proposal(&Proposal::message("fine"), &schedule).is_none());
    }
}
