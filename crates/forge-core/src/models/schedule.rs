// ABOUTME: Calendar-indexed load series and schedule entry models
// ABOUTME: Maps (week, weekday) slots onto fixed day indices and exposes trailing windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use crate::constants::calendar::{DAYS_PER_WEEK, FIRST_WEEK};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Daily training loads, oldest first, one value per calendar day with no gaps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadSeries(Vec<f64>);

impl LoadSeries {
    /// Build a series, replacing negative or non-finite values with zero
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                if value.is_finite() && value >= 0.0 {
                    value
                } else {
                    warn!(index, value, "invalid daily load replaced with zero");
                    0.0
                }
            })
            .collect();
        Self(values)
    }

    /// Concatenate a historical prefix with the current series
    #[must_use]
    pub fn concat(prefix: &Self, current: &Self) -> Self {
        let mut values = Vec::with_capacity(prefix.len() + current.len());
        values.extend_from_slice(&prefix.0);
        values.extend_from_slice(&current.0);
        Self(values)
    }

    /// Raw values
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of days in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series holds no days
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Load on a given day index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Overwrite the load at `index`, returning false when out of bounds
    pub fn set(&mut self, index: usize, value: f64) -> bool {
        self.0.get_mut(index).is_some_and(|slot| {
            *slot = value.max(0.0);
            true
        })
    }

    /// The last `days` values, or the whole series when shorter
    #[must_use]
    pub fn trailing(&self, days: usize) -> &[f64] {
        let start = self.0.len().saturating_sub(days);
        &self.0[start..]
    }

    /// Sum of all loads
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Number of (possibly partial) weeks covered by the series
    #[must_use]
    pub fn week_count(&self) -> u32 {
        self.0.len().div_ceil(DAYS_PER_WEEK) as u32
    }

    /// Week containing the most recent day, if any
    #[must_use]
    pub fn current_week(&self) -> Option<u32> {
        (!self.0.is_empty()).then(|| self.week_count())
    }

    /// Loads of a 1-based week; shorter than seven values when the series ends mid-week
    #[must_use]
    pub fn week(&self, week: u32) -> Option<&[f64]> {
        if week < FIRST_WEEK {
            return None;
        }
        let start = (week - FIRST_WEEK) as usize * DAYS_PER_WEEK;
        if start >= self.0.len() {
            return None;
        }
        let end = (start + DAYS_PER_WEEK).min(self.0.len());
        Some(&self.0[start..end])
    }

    /// Total load of a 1-based week (zero when the week is absent)
    #[must_use]
    pub fn week_total(&self, week: u32) -> f64 {
        self.week(week).map_or(0.0, |loads| loads.iter().sum())
    }
}

impl From<Vec<f64>> for LoadSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// Map a Monday-based index (0..7) to a weekday
#[must_use]
pub fn weekday_from_index(index: usize) -> Weekday {
    match index % DAYS_PER_WEEK {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// Parse a short or long weekday name, case-insensitively
#[must_use]
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    name.trim().parse().ok()
}

/// One calendar cell: a 1-based week and a weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DaySlot {
    /// 1-based week number
    pub week: u32,
    /// Day within the week
    pub day: Weekday,
}

impl DaySlot {
    /// Create a slot
    #[must_use]
    pub const fn new(week: u32, day: Weekday) -> Self {
        Self { week, day }
    }

    /// Position of this slot in a program-aligned load series
    #[must_use]
    pub fn load_index(&self) -> Option<usize> {
        (self.week >= FIRST_WEEK).then(|| {
            (self.week - FIRST_WEEK) as usize * DAYS_PER_WEEK
                + self.day.num_days_from_monday() as usize
        })
    }

    /// Slot for a series index
    #[must_use]
    pub fn from_load_index(index: usize) -> Self {
        Self {
            week: (index / DAYS_PER_WEEK) as u32 + FIRST_WEEK,
            day: weekday_from_index(index),
        }
    }

    /// Walk `days` steps through the weekly cycle, carrying week rollover.
    ///
    /// Returns `None` when the walk lands before week 1.
    #[must_use]
    pub fn offset_by(&self, days: i64) -> Option<Self> {
        let index = i64::try_from(self.load_index()?).ok()? + days;
        let index = usize::try_from(index).ok()?;
        Some(Self::from_load_index(index))
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, week {}", self.day, self.week)
    }
}

/// Opaque, stable identifier of a schedule entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wrap an identifier issued by the schedule store
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What a schedule entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A concrete exercise prescription
    Exercise,
    /// A slot reserved for an exercise not chosen yet
    Placeholder,
}

/// How an exercise's intensity is prescribed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadType {
    /// Rate of perceived exertion (5-10)
    Rpe,
    /// Percent of one-repetition maximum
    Percent,
    /// Absolute weight
    Weight,
    /// Free-text prescription the engine cannot step
    Text,
}

impl LoadType {
    /// Short upper-case label used in notifications
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rpe => "RPE",
            Self::Percent => "PERCENT",
            Self::Weight => "WEIGHT",
            Self::Text => "TEXT",
        }
    }
}

/// Intensity prescription attached to an entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    /// Prescription scale
    pub load_type: LoadType,
    /// Current value on that scale
    pub value: f64,
}

/// Read-only view of one card in the external schedule store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Stable identifier
    pub id: EntryId,
    /// Calendar cell holding the entry
    pub slot: DaySlot,
    /// Exercise display name
    pub exercise_name: String,
    /// Exercise library identifier when resolved
    pub exercise_id: Option<String>,
    /// Exercise or placeholder
    pub kind: EntryKind,
    /// Training load contributed to the day
    pub load: f64,
    /// Intensity prescription, if any
    pub prescription: Option<Prescription>,
    /// Prescribed sets
    pub sets: Option<u32>,
    /// Prescribed reps per set
    pub reps: Option<u32>,
}

impl ScheduleEntry {
    /// Whether this entry is a placeholder
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.kind == EntryKind::Placeholder
    }
}

/// Region of the schedule to read entries from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ScheduleScope {
    /// Every entry in the program
    Program,
    /// All entries in one week
    Week {
        /// 1-based week
        week: u32,
    },
    /// An inclusive range of weeks
    Weeks {
        /// First week of the range
        start: u32,
        /// Last week of the range
        end: u32,
    },
    /// A single day
    Day {
        /// The day
        slot: DaySlot,
    },
}

impl ScheduleScope {
    /// Whether `slot` falls inside this scope
    #[must_use]
    pub fn contains(&self, slot: DaySlot) -> bool {
        match *self {
            Self::Program => true,
            Self::Week { week } => slot.week == week,
            Self::Weeks { start, end } => (start..=end).contains(&slot.week),
            Self::Day { slot: target } => slot == target,
        }
    }
}

impl fmt::Display for ScheduleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Program => f.write_str("the program"),
            Self::Week { week } => write!(f, "week {week}"),
            Self::Weeks { start, end } => write!(f, "weeks {start}-{end}"),
            Self::Day { slot } => write!(f, "{slot}"),
        }
    }
}
