// ABOUTME: Shared test utilities and in-memory collaborators for integration tests
// ABOUTME: Provides a schedule store, recording notifier, scripted confirmation, and engine setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `forge_assist`
//!
//! The collaborators here stand in for the host editor: a schedule store
//! that also applies mutations, a notifier that records every notice, and a
//! confirmation surface that answers from a script or waits on a gate.

use async_trait::async_trait;
use chrono::Weekday;
use forge_assist::models::{
    Change, ChangeDescriptor, DaySlot, Difficulty, EntryId, EntryKind, ExerciseMetadata,
    LoadSeries, LoadType, Prescription, ScheduleEntry, ScheduleScope, weekday_from_index,
};
use forge_assist::{
    ActionEngine, ApplyError, ConfirmationRequest, ConfirmationSurface, EngineDependencies,
    EngineSettings, ExerciseLookup, MutationApplier, Notifier, PreviewSurface, ScheduleAccessor,
    Severity,
};
use forge_assist::engine::PreviewTarget;
use std::collections::VecDeque;
use std::env;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, Once};
use tokio::sync::oneshot;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Schedule store
// ============================================================================

/// In-memory schedule that serves reads and applies confirmed changes
pub struct ScheduleStore {
    weeks: u32,
    entries: Mutex<Vec<ScheduleEntry>>,
    applied: Mutex<Vec<ChangeDescriptor>>,
    rejected: Mutex<Vec<EntryId>>,
}

impl ScheduleStore {
    pub fn new(weeks: u32) -> Self {
        Self {
            weeks,
            entries: Mutex::new(Vec::new()),
            applied: Mutex::new(Vec::new()),
            rejected: Mutex::new(Vec::new()),
        }
    }

    /// Add an exercise entry and return its id
    pub fn add(&self, id: &str, week: u32, day: Weekday, name: &str, load: f64) -> EntryId {
        self.insert(entry(id, DaySlot::new(week, day), name, load))
    }

    /// Add an entry with an intensity prescription
    pub fn add_prescribed(
        &self,
        id: &str,
        week: u32,
        day: Weekday,
        name: &str,
        load: f64,
        load_type: LoadType,
        value: f64,
    ) -> EntryId {
        let mut card = entry(id, DaySlot::new(week, day), name, load);
        card.prescription = Some(Prescription { load_type, value });
        self.insert(card)
    }

    /// Add a placeholder entry
    pub fn add_placeholder(&self, id: &str, week: u32, day: Weekday) -> EntryId {
        let mut card = entry(id, DaySlot::new(week, day), "Placeholder", 0.0);
        card.kind = EntryKind::Placeholder;
        self.insert(card)
    }

    pub fn insert(&self, entry: ScheduleEntry) -> EntryId {
        let id = entry.id.clone();
        self.entries.lock().unwrap().push(entry);
        id
    }

    /// Fill every day in `weeks` with one entry carrying the load from `daily`
    pub fn fill_weeks(&self, weeks: RangeInclusive<u32>, daily: impl Fn(u32, usize) -> f64) {
        for week in weeks {
            for day in 0..7 {
                let load = daily(week, day);
                if load > 0.0 {
                    let slot = DaySlot::new(week, weekday_from_index(day));
                    self.insert(entry(&format!("w{week}d{day}"), slot, "Back Squat", load));
                }
            }
        }
    }

    /// Remove an entry behind the engine's back
    pub fn delete(&self, id: &EntryId) {
        self.entries.lock().unwrap().retain(|entry| &entry.id != id);
    }

    /// Overwrite an entry's load behind the engine's back
    pub fn set_load(&self, id: &EntryId, load: f64) {
        if let Some(entry) = self.entries.lock().unwrap().iter_mut().find(|e| &e.id == id) {
            entry.load = load;
        }
    }

    /// Make the store refuse changes to `id`
    pub fn reject(&self, id: &EntryId) {
        self.rejected.lock().unwrap().push(id.clone());
    }

    pub fn applied(&self) -> Vec<ChangeDescriptor> {
        self.applied.lock().unwrap().clone()
    }

    pub fn all_entries(&self) -> Vec<ScheduleEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn day_load(&self, slot: DaySlot) -> f64 {
        self.entries_in(ScheduleScope::Day { slot })
            .iter()
            .map(|entry| entry.load)
            .sum()
    }
}

fn entry(id: &str, slot: DaySlot, name: &str, load: f64) -> ScheduleEntry {
    ScheduleEntry {
        id: EntryId::new(id),
        slot,
        exercise_name: name.to_owned(),
        exercise_id: None,
        kind: EntryKind::Exercise,
        load,
        prescription: None,
        sets: Some(3),
        reps: Some(5),
    }
}

impl ScheduleAccessor for ScheduleStore {
    fn load_series(&self) -> LoadSeries {
        let mut loads = vec![0.0; self.weeks as usize * 7];
        for entry in self.entries.lock().unwrap().iter() {
            if let Some(index) = entry.slot.load_index().filter(|i| *i < loads.len()) {
                loads[index] += entry.load;
            }
        }
        LoadSeries::new(loads)
    }

    fn total_weeks(&self) -> u32 {
        self.weeks
    }

    fn entries_in(&self, scope: ScheduleScope) -> Vec<ScheduleEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| scope.contains(entry.slot))
            .cloned()
            .collect()
    }

    fn entry(&self, id: &EntryId) -> Option<ScheduleEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|entry| &entry.id == id)
            .cloned()
    }
}

impl MutationApplier for ScheduleStore {
    fn apply(&self, change: &ChangeDescriptor) -> Result<(), ApplyError> {
        let Some(id) = &change.entry else {
            return Err(ApplyError("day-level changes must be resolved to entries".to_owned()));
        };
        if self.rejected.lock().unwrap().contains(id) {
            return Err(ApplyError(format!("entry {id} is locked")));
        }

        let mut entries = self.entries.lock().unwrap();
        let position = entries
            .iter()
            .position(|entry| &entry.id == id)
            .ok_or_else(|| ApplyError(format!("entry {id} not found")))?;
        match change.change {
            Change::Remove { .. } => {
                entries.remove(position);
            }
            Change::Move { to, .. } => entries[position].slot = to,
            Change::ModifyLoad { new_load, .. } => entries[position].load = new_load,
            Change::ModifyIntensity {
                load_type,
                new_value,
                new_load,
                ..
            } => {
                entries[position].prescription = Some(Prescription {
                    load_type,
                    value: new_value,
                });
                entries[position].load = new_load;
            }
            Change::Add { load } => entries[position].load += load,
            Change::Modify { load_change } => entries[position].load += load_change,
        }
        drop(entries);
        self.applied.lock().unwrap().push(change.clone());
        Ok(())
    }
}

// ============================================================================
// Notifier, preview, and confirmation
// ============================================================================

/// One recorded notice
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u64,
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.message).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity, duration_ms: u64) {
        self.notices.lock().unwrap().push(Notice {
            message: message.to_owned(),
            severity,
            duration_ms,
        });
    }
}

#[derive(Default)]
pub struct RecordingPreview {
    highlighted: Mutex<Vec<PreviewTarget>>,
    clears: Mutex<usize>,
}

impl RecordingPreview {
    pub fn highlighted(&self) -> Vec<PreviewTarget> {
        self.highlighted.lock().unwrap().clone()
    }

    pub fn clears(&self) -> usize {
        *self.clears.lock().unwrap()
    }
}

impl PreviewSurface for RecordingPreview {
    fn highlight(&self, targets: &[PreviewTarget]) {
        self.highlighted.lock().unwrap().extend_from_slice(targets);
    }

    fn clear_all(&self) {
        self.highlighted.lock().unwrap().clear();
        *self.clears.lock().unwrap() += 1;
    }
}

/// Confirmation surface answering from a script, or waiting on armed gates first
#[derive(Default)]
pub struct ScriptedConfirmation {
    answers: Mutex<VecDeque<bool>>,
    gates: Mutex<VecDeque<oneshot::Receiver<bool>>>,
    requests: Mutex<Vec<ConfirmationRequest>>,
}

impl ScriptedConfirmation {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            ..Self::default()
        }
    }

    pub fn push(&self, answer: bool) {
        self.answers.lock().unwrap().push_back(answer);
    }

    /// The next confirmation waits until the returned sender fires
    pub fn arm(&self) -> oneshot::Sender<bool> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn requests(&self) -> Vec<ConfirmationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationSurface for ScriptedConfirmation {
    async fn confirm(&self, request: ConfirmationRequest) -> bool {
        self.requests.lock().unwrap().push(request);
        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            return gate.await.unwrap_or(false);
        }
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}

// ============================================================================
// Exercise library
// ============================================================================

pub struct ExerciseLibrary {
    exercises: Vec<ExerciseMetadata>,
}

fn exercise(id: &str, name: &str, primary: &[&str], equipment: &[&str], difficulty: Difficulty) -> ExerciseMetadata {
    ExerciseMetadata {
        id: id.to_owned(),
        name: name.to_owned(),
        primary_muscles: primary.iter().map(|m| (*m).to_owned()).collect(),
        secondary_muscles: Vec::new(),
        equipment: equipment.iter().map(|e| (*e).to_owned()).collect(),
        difficulty,
    }
}

impl Default for ExerciseLibrary {
    fn default() -> Self {
        Self {
            exercises: vec![
                exercise("back-squat", "Back Squat", &["quadriceps", "glutes"], &["barbell", "rack"], Difficulty::Intermediate),
                exercise("goblet-squat", "Goblet Squat", &["quadriceps", "glutes"], &["dumbbell"], Difficulty::Beginner),
                exercise("front-squat", "Front Squat", &["quadriceps"], &["barbell", "rack"], Difficulty::Advanced),
                exercise("split-squat", "Bulgarian Split Squat", &["quadriceps", "glutes"], &["bodyweight"], Difficulty::Intermediate),
                exercise("bench-press", "Bench Press", &["chest", "triceps"], &["barbell", "bench"], Difficulty::Intermediate),
                exercise("push-up", "Push-up", &["chest", "triceps"], &["bodyweight"], Difficulty::Beginner),
            ],
        }
    }
}

impl ExerciseLookup for ExerciseLibrary {
    fn exercise(&self, id: &str) -> Option<ExerciseMetadata> {
        self.exercises.iter().find(|e| e.id == id).cloned()
    }

    fn find_by_name(&self, name: &str) -> Option<String> {
        self.exercises
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .map(|e| e.id.clone())
    }

    fn catalog(&self) -> Vec<ExerciseMetadata> {
        self.exercises.clone()
    }
}

// ============================================================================
// Engine setup
// ============================================================================

/// An engine wired to in-memory collaborators
pub struct Harness {
    pub engine: Arc<ActionEngine>,
    pub store: Arc<ScheduleStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub confirmation: Arc<ScriptedConfirmation>,
    pub preview: Arc<RecordingPreview>,
}

impl Harness {
    pub fn new(store: ScheduleStore) -> Self {
        Self::with_history(store, LoadSeries::default())
    }

    pub fn with_history(store: ScheduleStore, history: LoadSeries) -> Self {
        init_test_logging();
        let store = Arc::new(store);
        let notifier = Arc::new(RecordingNotifier::default());
        let confirmation = Arc::new(ScriptedConfirmation::default());
        let preview = Arc::new(RecordingPreview::default());

        let deps = EngineDependencies::builder()
            .schedule(store.clone())
            .exercises(Arc::new(ExerciseLibrary::default()))
            .notifier(notifier.clone())
            .confirmation(confirmation.clone())
            .applier(store.clone())
            .preview(preview.clone())
            .history(history)
            .build()
            .unwrap();
        let engine = Arc::new(ActionEngine::new(deps, EngineSettings::default()).unwrap());

        Self {
            engine,
            store,
            notifier,
            confirmation,
            preview,
        }
    }
}
