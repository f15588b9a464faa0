// ABOUTME: Integration tests for schedule-editing actions and free-text commands
// ABOUTME: Shift, intensity, placeholder, swap, and contextual action behavior through the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Weekday;
use common::{Harness, ScheduleStore};
use forge_assist::engine::{ActionOutcome, Direction, IntensityDirection};
use forge_assist::intelligence::exercise::SwapReason;
use forge_assist::models::{DaySlot, EquipmentProfile, LoadType};
use forge_assist::{
    ActionContext, ActionRequest, ActionResult, ScheduleAccessor, Selection, Severity,
};

fn completed(result: ActionResult) -> ActionOutcome {
    match result {
        ActionResult::Completed(outcome) => outcome,
        other => panic!("expected a completed action, got {other:?}"),
    }
}

fn info(result: ActionResult) -> String {
    match result {
        ActionResult::Info(message) => message,
        other => panic!("expected an informational result, got {other:?}"),
    }
}

#[tokio::test]
async fn test_shift_week_skips_entries_leaving_the_program() {
    let store = ScheduleStore::new(4);
    store.add("mon", 4, Weekday::Mon, "Back Squat", 300.0);
    store.add("sat", 4, Weekday::Sat, "Deadlift", 350.0);
    store.add("sun", 4, Weekday::Sun, "Bench Press", 200.0);
    let harness = Harness::new(store);
    harness.confirmation.push(true);

    let outcome = completed(
        harness
            .engine
            .run(ActionRequest::ShiftWeek {
                week: 4,
                direction: Direction::Forward,
                days: 2,
            })
            .await
            .unwrap(),
    );

    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.skipped, 2);
    assert_eq!(outcome.severity, Severity::Warning);
    assert_eq!(outcome.message, "Shifted 1 entry (2 skipped).");
    assert_eq!(harness.confirmation.requests()[0].change_count, 1);

    let moved = harness.store.entry(&"mon".into()).unwrap();
    assert_eq!(moved.slot, DaySlot::new(4, Weekday::Wed));
    let stayed = harness.store.entry(&"sun".into()).unwrap();
    assert_eq!(stayed.slot, DaySlot::new(4, Weekday::Sun));
}

#[tokio::test]
async fn test_shift_back_crosses_week_boundary() {
    let store = ScheduleStore::new(3);
    store.add("tue", 2, Weekday::Tue, "Back Squat", 300.0);
    let harness = Harness::new(store);
    harness.confirmation.push(true);

    let outcome = completed(
        harness
            .engine
            .run(ActionRequest::ShiftDay {
                slot: DaySlot::new(2, Weekday::Tue),
                direction: Direction::Back,
                days: 3,
            })
            .await
            .unwrap(),
    );

    assert_eq!(outcome.message, "Shifted 1 entry from Tue, week 2.");
    let moved = harness.store.entry(&"tue".into()).unwrap();
    assert_eq!(moved.slot, DaySlot::new(1, Weekday::Sat));
}

#[tokio::test]
async fn test_shift_with_no_valid_target_never_previews() {
    let store = ScheduleStore::new(1);
    store.add("sun", 1, Weekday::Sun, "Back Squat", 300.0);
    let harness = Harness::new(store);

    let message = info(
        harness
            .engine
            .run(ActionRequest::ShiftWeek {
                week: 1,
                direction: Direction::Forward,
                days: 1,
            })
            .await
            .unwrap(),
    );

    assert!(message.starts_with("No entries in week 1 could be shifted"));
    assert!(harness.confirmation.requests().is_empty());
}

#[tokio::test]
async fn test_missed_session_moves_day_forward() {
    let store = ScheduleStore::new(2);
    store.add("sq", 1, Weekday::Mon, "Back Squat", 300.0);
    let harness = Harness::new(store);
    harness.confirmation.push(true);

    let outcome = completed(
        harness
            .engine
            .process_command("Athlete missed Monday week 1")
            .await
            .unwrap()
            .unwrap(),
    );

    assert!(outcome.is_confirmed());
    assert_eq!(
        harness.confirmation.requests()[0].message,
        "Athlete missed Mon, week 1. Shift 1 entry forward 1 day?"
    );
    let moved = harness.store.entry(&"sq".into()).unwrap();
    assert_eq!(moved.slot, DaySlot::new(1, Weekday::Tue));
}

#[tokio::test]
async fn test_intensity_steps_and_limits() {
    let store = ScheduleStore::new(1);
    store.add_prescribed("sq", 1, Weekday::Mon, "Back Squat", 400.0, LoadType::Rpe, 8.0);
    store.add_prescribed("bp", 1, Weekday::Wed, "Bench Press", 300.0, LoadType::Rpe, 10.0);
    store.add_prescribed("dl", 1, Weekday::Fri, "Deadlift", 500.0, LoadType::Percent, 80.0);
    store.add_prescribed("run", 1, Weekday::Sat, "Easy Run", 100.0, LoadType::Text, 0.0);
    let harness = Harness::new(store);
    harness.confirmation.push(true);
    harness.confirmation.push(true);

    let up = completed(
        harness
            .engine
            .run(ActionRequest::ChangeIntensity {
                entry: "sq".into(),
                direction: IntensityDirection::Increase,
            })
            .await
            .unwrap(),
    );
    assert_eq!(up.message, "Increased intensity. New RPE: 8.5");
    let squat = harness.store.entry(&"sq".into()).unwrap();
    assert!((squat.prescription.unwrap().value - 8.5).abs() < f64::EPSILON);
    assert!((squat.load - 425.0).abs() < f64::EPSILON);

    let down = completed(
        harness
            .engine
            .run(ActionRequest::ChangeIntensity {
                entry: "dl".into(),
                direction: IntensityDirection::Decrease,
            })
            .await
            .unwrap(),
    );
    assert_eq!(down.message, "Decreased intensity. New PERCENT: 75%");

    let capped = info(
        harness
            .engine
            .run(ActionRequest::ChangeIntensity {
                entry: "bp".into(),
                direction: IntensityDirection::Increase,
            })
            .await
            .unwrap(),
    );
    assert_eq!(
        capped,
        "Intensity for Bench Press is already at its maximum limit for this adjustment type."
    );

    let text = info(
        harness
            .engine
            .run(ActionRequest::ChangeIntensity {
                entry: "run".into(),
                direction: IntensityDirection::Increase,
            })
            .await
            .unwrap(),
    );
    assert_eq!(text, "Cannot adjust intensity for load type TEXT.");
    assert_eq!(harness.notifier.last().unwrap().severity, Severity::Warning);
    assert_eq!(harness.confirmation.requests().len(), 2);
}

#[tokio::test]
async fn test_remove_placeholder_only_targets_placeholders() {
    let store = ScheduleStore::new(1);
    store.add_placeholder("ph", 1, Weekday::Thu);
    store.add("sq", 1, Weekday::Mon, "Back Squat", 300.0);
    let harness = Harness::new(store);
    harness.confirmation.push(true);

    let refused = info(
        harness
            .engine
            .run(ActionRequest::RemovePlaceholder { entry: "sq".into() })
            .await
            .unwrap(),
    );
    assert_eq!(refused, "Back Squat is not a placeholder.");

    let outcome = completed(
        harness
            .engine
            .run(ActionRequest::RemovePlaceholder { entry: "ph".into() })
            .await
            .unwrap(),
    );
    assert_eq!(outcome.message, "Removed placeholder Placeholder.");
    assert!(harness.store.entry(&"ph".into()).is_none());
}

#[tokio::test]
async fn test_clear_empty_scope_is_informational() {
    let harness = Harness::new(ScheduleStore::new(2));

    let message = info(
        harness
            .engine
            .run(ActionRequest::ClearWeek { week: 2 })
            .await
            .unwrap(),
    );

    assert_eq!(message, "No entries found in week 2 to clear.");
    assert!(harness.confirmation.requests().is_empty());
}

#[tokio::test]
async fn test_unrecognized_command_is_reported() {
    let harness = Harness::new(ScheduleStore::new(1));

    let result = harness
        .engine
        .process_command("  please   do the thing ")
        .await
        .unwrap();

    assert!(result.is_none());
    let notice = harness.notifier.last().unwrap();
    assert_eq!(notice.message, "Command not understood: \"please   do the thing\"");
    assert_eq!(notice.severity, Severity::Warning);
}

#[tokio::test]
async fn test_commands_are_case_and_whitespace_insensitive() {
    let store = ScheduleStore::new(2);
    store.add("sq", 2, Weekday::Mon, "Back Squat", 300.0);
    store.add("dl", 2, Weekday::Thu, "Deadlift", 400.0);
    let harness = Harness::new(store);
    harness.confirmation.push(true);

    let outcome = completed(
        harness
            .engine
            .process_command("  REDUCE   week 2 BY 25% ")
            .await
            .unwrap()
            .unwrap(),
    );

    assert_eq!(outcome.message, "Applied load reduction (25%) to 2 entries in week 2.");
    assert!((harness.store.entry(&"sq".into()).unwrap().load - 225.0).abs() < f64::EPSILON);
    assert!((harness.store.entry(&"dl".into()).unwrap().load - 300.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_swap_suggestions_follow_equipment_profile() {
    let store = ScheduleStore::new(1);
    store.add("sq", 1, Weekday::Mon, "Back Squat", 300.0);
    let harness = Harness::new(store);

    let ActionResult::Swaps(swaps) = harness
        .engine
        .run(ActionRequest::SuggestSwap {
            exercise_name: "back squat".to_owned(),
            reason: SwapReason::Variation,
        })
        .await
        .unwrap()
    else {
        panic!("expected swap suggestions");
    };
    let names: Vec<_> = swaps.iter().map(|s| s.exercise.name.as_str()).collect();
    assert_eq!(names, vec!["Goblet Squat", "Bulgarian Split Squat", "Front Squat"]);

    let confirmation = harness
        .engine
        .process_command("switch to minimal equipment")
        .await
        .unwrap();
    assert!(matches!(confirmation, Some(ActionResult::Info(_))));
    assert_eq!(harness.engine.equipment_profile(), EquipmentProfile::Minimal);

    let Some(ActionResult::Swaps(swaps)) = harness
        .engine
        .process_command("suggest alternatives for back squat")
        .await
        .unwrap()
    else {
        panic!("expected swap suggestions");
    };
    assert_eq!(swaps.len(), 1);
    assert_eq!(swaps[0].exercise.name, "Bulgarian Split Squat");

    let missing = info(
        harness
            .engine
            .run(ActionRequest::SuggestSwap {
                exercise_name: "zercher carry".to_owned(),
                reason: SwapReason::Variation,
            })
            .await
            .unwrap(),
    );
    assert_eq!(missing, "Exercise \"zercher carry\" not found in library.");
}

#[test]
fn test_contextual_actions_follow_selection() {
    let store = ScheduleStore::new(2);
    store.add_prescribed("sq", 1, Weekday::Mon, "Back Squat", 300.0, LoadType::Rpe, 7.0);
    store.add("bp", 1, Weekday::Wed, "Bench Press", 200.0);
    let harness = Harness::new(store);
    let engine = &harness.engine;

    assert!(engine.get_contextual_actions().is_empty());

    engine.update_context(ActionContext::focused(Selection::Entry("sq".into())));
    let ids: Vec<_> = engine
        .get_contextual_actions()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert!(ids.iter().any(|id| id == "increase_intensity"));
    assert!(ids.iter().any(|id| id == "suggest_swap"));

    engine.update_context(ActionContext::focused(Selection::Entry("bp".into())));
    let ids: Vec<_> = engine
        .get_contextual_actions()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert!(!ids.iter().any(|id| id == "increase_intensity"));

    engine.update_context(ActionContext::focused(Selection::Day(DaySlot::new(
        2,
        Weekday::Fri,
    ))));
    let ids: Vec<_> = engine
        .get_contextual_actions()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec!["simulate_rest"]);
}

#[tokio::test]
async fn test_day_what_if_reports_without_mutating() {
    let store = ScheduleStore::new(1);
    store.add("sq", 1, Weekday::Mon, "Back Squat", 300.0);
    let harness = Harness::new(store);

    let ActionResult::Scenarios(scenarios) = harness
        .engine
        .run(ActionRequest::SimulateDay {
            slot: DaySlot::new(1, Weekday::Mon),
        })
        .await
        .unwrap()
    else {
        panic!("expected scenarios");
    };

    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0].label, "Rest on Mon, week 1");
    assert!((scenarios[0].impact.estimated_load_change + 300.0).abs() < 1e-9);
    assert!((harness.store.load_series().total() - 300.0).abs() < f64::EPSILON);
    assert!(harness.store.applied().is_empty());
}
