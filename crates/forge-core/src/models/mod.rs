// ABOUTME: Core data models for load series, schedule entries, and change descriptors
// ABOUTME: Re-exports the types shared by the intelligence crate and the action engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! # Data Models
//!
//! The engine never sees the calendar UI. It works on three representations:
//!
//! - `LoadSeries`: one non-negative load per calendar day, oldest first
//! - `ScheduleEntry`: an opaque handle onto one card in the external schedule store
//! - `ChangeDescriptor`: one atomic proposed mutation, used identically for
//!   simulation and for the later apply step

mod change;
mod exercise;
mod schedule;

pub use change::{Change, ChangeDescriptor};
pub use exercise::{Difficulty, EquipmentProfile, ExerciseMetadata};
pub use schedule::{
    parse_weekday, weekday_from_index, DaySlot, EntryId, EntryKind, LoadSeries, LoadType,
    Prescription, ScheduleEntry, ScheduleScope,
};
