// ABOUTME: Change descriptors describing one atomic proposed mutation to the schedule
// ABOUTME: Shared by the impact simulator (as load deltas) and the executor (as apply payloads)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::schedule::{DaySlot, EntryId, LoadType, ScheduleEntry};
use serde::{Deserialize, Serialize};

/// What the descriptor does to its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Change {
    /// Add load to the target day
    Add {
        /// Load added
        load: f64,
    },
    /// Remove an entry (or a day's load)
    Remove {
        /// Load removed
        load: f64,
    },
    /// Generic signed load adjustment
    Modify {
        /// Signed load delta
        load_change: f64,
    },
    /// Replace a load value
    ModifyLoad {
        /// Load when the change was computed
        original_load: f64,
        /// Load after the change
        new_load: f64,
    },
    /// Step an intensity prescription, with its estimated load effect
    ModifyIntensity {
        /// Prescription scale
        load_type: LoadType,
        /// Prescription value before the change
        original_value: f64,
        /// Prescription value after the change
        new_value: f64,
        /// Estimated load before
        original_load: f64,
        /// Estimated load after
        new_load: f64,
    },
    /// Move an entry to another day
    Move {
        /// Destination day
        to: DaySlot,
        /// Load carried by the entry
        load: f64,
    },
}

/// One atomic proposed mutation with its target.
///
/// The target is an entry when it is already resolved to a concrete card;
/// otherwise `slot` (or a raw `load_index`) scopes the change to a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDescriptor {
    /// Affected schedule entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryId>,
    /// Day holding the affected load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<DaySlot>,
    /// Direct series index when no slot is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_index: Option<usize>,
    /// The change itself
    #[serde(flatten)]
    pub change: Change,
}

impl ChangeDescriptor {
    /// Remove a concrete entry
    #[must_use]
    pub fn remove_entry(entry: &ScheduleEntry) -> Self {
        Self {
            entry: Some(entry.id.clone()),
            slot: Some(entry.slot),
            load_index: None,
            change: Change::Remove { load: entry.load },
        }
    }

    /// Move a concrete entry to another day
    #[must_use]
    pub fn move_entry(entry: &ScheduleEntry, to: DaySlot) -> Self {
        Self {
            entry: Some(entry.id.clone()),
            slot: Some(entry.slot),
            load_index: None,
            change: Change::Move {
                to,
                load: entry.load,
            },
        }
    }

    /// Replace a concrete entry's load
    #[must_use]
    pub fn modify_entry_load(entry: &ScheduleEntry, new_load: f64) -> Self {
        Self {
            entry: Some(entry.id.clone()),
            slot: Some(entry.slot),
            load_index: None,
            change: Change::ModifyLoad {
                original_load: entry.load,
                new_load,
            },
        }
    }

    /// Change a whole day's load before it is resolved to entries
    #[must_use]
    pub const fn modify_day_load(slot: DaySlot, original_load: f64, new_load: f64) -> Self {
        Self {
            entry: None,
            slot: Some(slot),
            load_index: None,
            change: Change::ModifyLoad {
                original_load,
                new_load,
            },
        }
    }

    /// Clear a whole day's load before it is resolved to entries
    #[must_use]
    pub const fn clear_day_load(slot: DaySlot, load: f64) -> Self {
        Self {
            entry: None,
            slot: Some(slot),
            load_index: None,
            change: Change::Remove { load },
        }
    }

    /// Signed adjustment addressed by raw series index
    #[must_use]
    pub const fn at_index(load_index: usize, load_change: f64) -> Self {
        Self {
            entry: None,
            slot: None,
            load_index: Some(load_index),
            change: Change::Modify { load_change },
        }
    }

    /// Action-neutral name of the change type
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self.change {
            Change::Add { .. } => "add",
            Change::Remove { .. } => "remove",
            Change::Modify { .. } => "modify",
            Change::ModifyLoad { .. } => "modifyLoad",
            Change::ModifyIntensity { .. } => "modifyIntensity",
            Change::Move { .. } => "move",
        }
    }

    /// Remove and move changes also flag the containing day during preview
    #[must_use]
    pub const fn affects_day(&self) -> bool {
        matches!(self.change, Change::Remove { .. } | Change::Move { .. })
    }

    /// Series index of the source day, if resolvable
    #[must_use]
    pub fn target_index(&self) -> Option<usize> {
        self.slot
            .and_then(|slot| slot.load_index())
            .or(self.load_index)
    }

    /// Nominal load delta at the source day before clamping.
    ///
    /// Moves report the load leaving the source day.
    #[must_use]
    pub fn load_delta(&self) -> f64 {
        match self.change {
            Change::Add { load } => load,
            Change::Remove { load } | Change::Move { load, .. } => -load,
            Change::Modify { load_change } => load_change,
            Change::ModifyLoad {
                original_load,
                new_load,
            }
            | Change::ModifyIntensity {
                original_load,
                new_load,
                ..
            } => new_load - original_load,
        }
    }

    /// Short description used in logs and confirmation details
    #[must_use]
    pub fn describe(&self) -> String {
        let target = match (&self.entry, &self.slot, self.load_index) {
            (Some(entry), _, _) => format!("entry {entry}"),
            (None, Some(slot), _) => slot.to_string(),
            (None, None, Some(index)) => format!("day index {index}"),
            (None, None, None) => "unresolved target".to_owned(),
        };
        match self.change {
            Change::Move { to, .. } => format!("move {target} to {to}"),
            _ => format!("{} {target} ({:+.0})", self.kind_name(), self.load_delta()),
        }
    }
}
