// ABOUTME: Exercise-level coaching helpers: swap candidates, rotation checks, progression ideas
// ABOUTME: Operate on exercise library metadata and schedule prescriptions only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Exercise coaching helpers.

mod progression;
mod swap;

pub use progression::{suggest_progression, ProgressionPlan, TrainingGoal};
pub use swap::{check_rotation, suggest_swaps, RotationAdvice, SwapReason, SwapSuggestion};

/// Name fragments identifying multi-joint lifts
const COMPOUND_MARKERS: [&str; 8] = [
    "squat", "bench", "deadlift", "press", "pull", "clean", "snatch", "jerk",
];

/// Whether an exercise name denotes a compound lift
#[must_use]
pub fn is_compound(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    COMPOUND_MARKERS.iter().any(|marker| lower.contains(marker))
}
