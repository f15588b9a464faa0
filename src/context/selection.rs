// ABOUTME: Current calendar selection driving contextual action availability
// ABOUTME: Tracks one focused target plus an optional multi-select set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use forge_core::models::{DaySlot, EntryId, ScheduleScope};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A named block of weeks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRef {
    /// Display name
    pub name: String,
    /// First week, inclusive
    pub start_week: u32,
    /// Last week, inclusive
    pub end_week: u32,
}

impl PhaseRef {
    /// Build a phase reference
    #[must_use]
    pub fn new(name: impl Into<String>, start_week: u32, end_week: u32) -> Self {
        Self {
            name: name.into(),
            start_week,
            end_week,
        }
    }

    /// The weeks this phase covers
    #[must_use]
    pub const fn scope(&self) -> ScheduleScope {
        ScheduleScope::Weeks {
            start: self.start_week,
            end: self.end_week,
        }
    }
}

impl fmt::Display for PhaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (weeks {}-{})",
            self.name, self.start_week, self.end_week
        )
    }
}

/// Something the user can select on the calendar
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "camelCase")]
pub enum Selection {
    /// One schedule entry
    Entry(EntryId),
    /// One calendar day
    Day(DaySlot),
    /// A training phase
    Phase(PhaseRef),
}

/// Selection state the engine derives actions from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionContext {
    /// Focused target
    pub selected: Option<Selection>,
    /// Multi-selected targets
    #[serde(default)]
    pub selected_set: HashSet<Selection>,
}

impl ActionContext {
    /// Context focused on a single target
    #[must_use]
    pub fn focused(selection: Selection) -> Self {
        Self {
            selected: Some(selection),
            selected_set: HashSet::new(),
        }
    }

    /// Whether nothing at all is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_none() && self.selected_set.is_empty()
    }

    /// Every selected target, focused one first
    pub fn targets(&self) -> impl Iterator<Item = &Selection> {
        let focused = self.selected.as_ref();
        focused.into_iter().chain(
            self.selected_set
                .iter()
                .filter(move |candidate| Some(*candidate) != focused),
        )
    }
}
