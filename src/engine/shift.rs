// ABOUTME: Plans calendar shifts of entries forward or back by a number of days
// ABOUTME: Entries whose destination falls outside the program are skipped, not clamped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use forge_core::models::{ChangeDescriptor, EntryId, ScheduleEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Direction of a calendar shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Later in the program
    Forward,
    /// Earlier in the program
    Back,
}

impl Direction {
    /// Parse `forward` or `back`
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "forward" | "forwards" => Some(Self::Forward),
            "back" | "backward" | "backwards" => Some(Self::Back),
            _ => None,
        }
    }

    /// +1 or -1
    #[must_use]
    pub const fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Back => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Back => f.write_str("back"),
        }
    }
}

/// Move descriptors plus the entries that could not move
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftPlan {
    /// One `Move` per entry that lands inside the program
    pub moves: Vec<ChangeDescriptor>,
    /// Entries whose destination is before week 1 or after the last week
    pub skipped: Vec<EntryId>,
}

/// Plan moving every entry `days` days in `direction`
#[must_use]
pub fn plan_shift(
    entries: &[ScheduleEntry],
    direction: Direction,
    days: u32,
    total_weeks: u32,
) -> ShiftPlan {
    let offset = direction.sign() * i64::from(days);
    let mut plan = ShiftPlan::default();

    for entry in entries {
        match entry.slot.offset_by(offset) {
            Some(target) if target.week <= total_weeks => {
                plan.moves.push(ChangeDescriptor::move_entry(entry, target));
            }
            _ => {
                debug!(entry = %entry.id, from = %entry.slot, offset, "shift target outside program");
                plan.skipped.push(entry.id.clone());
            }
        }
    }
    plan
}
