// ABOUTME: Progression ideas for one prescription, by load type and inferred training goal
// ABOUTME: Deterministic rule set assuming the athlete completed the prescribed reps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::is_compound;
use forge_core::constants::intensity::PERCENT_MAX;
use forge_core::models::{LoadType, Prescription};
use serde::{Deserialize, Serialize};

/// Training goal inferred from the rep target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingGoal {
    /// 5 reps or fewer
    Strength,
    /// 6 to 12 reps
    Hypertrophy,
    /// More than 12 reps
    Endurance,
}

impl TrainingGoal {
    /// Infer the goal from reps per set
    #[must_use]
    pub const fn from_reps(reps: u32) -> Self {
        match reps {
            0..=5 => Self::Strength,
            6..=12 => Self::Hypertrophy,
            _ => Self::Endurance,
        }
    }
}

/// Progression ideas for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionPlan {
    /// Inferred goal
    pub goal: TrainingGoal,
    /// Ordered suggestions, never empty
    pub suggestions: Vec<String>,
}

/// Build progression ideas for `exercise_name` at its current prescription
#[must_use]
pub fn suggest_progression(
    exercise_name: &str,
    prescription: Option<Prescription>,
    sets: Option<u32>,
    reps: Option<u32>,
) -> ProgressionPlan {
    let sets = sets.unwrap_or(0);
    let reps = reps.unwrap_or(0);
    let goal = TrainingGoal::from_reps(reps);
    let compound = is_compound(exercise_name);
    let mut suggestions = Vec::new();

    let intensity_increase = match prescription {
        Some(Prescription {
            load_type: LoadType::Rpe,
            value,
        }) => {
            if sets < 5 {
                suggestions.push(format!(
                    "Add 1 set (from {sets} to {}) while keeping RPE {value}.",
                    sets + 1
                ));
            } else {
                suggestions.push(format!(
                    "Add 1-2 reps per set while keeping the current weight at RPE {value}."
                ));
            }
            false
        }
        Some(Prescription {
            load_type: LoadType::Percent,
            value,
        }) => {
            let increment = if compound { 2.5 } else { 5.0 };
            let target = (value + increment).min(PERCENT_MAX);
            suggestions.push(format!(
                "Increase from {value}% to {target}% while keeping {reps} reps."
            ));
            true
        }
        Some(Prescription {
            load_type: LoadType::Weight,
            value,
        }) => {
            let increment = weight_increment(value, compound);
            suggestions.push(format!(
                "Increase weight from {value} to {}kg while keeping {reps} reps.",
                value + increment
            ));
            true
        }
        Some(Prescription {
            load_type: LoadType::Text,
            ..
        })
        | None => false,
    };

    match goal {
        TrainingGoal::Strength if intensity_increase => suggestions.push(
            "For strength, add rest-pause sets after the main work (10-20 s rest, then 2-3 more reps)."
                .to_owned(),
        ),
        TrainingGoal::Hypertrophy if !intensity_increase && prescription.is_some() => {
            suggestions.push(format!(
                "For hypertrophy, use double progression: once all sets reach {reps} reps, add 2.5-5% and start over."
            ));
        }
        TrainingGoal::Endurance => suggestions.push(
            "For endurance, keep the volume and shorten rest periods week to week.".to_owned(),
        ),
        _ => {}
    }

    let lower = exercise_name.to_ascii_lowercase();
    if lower.contains("squat") {
        suggestions.push("Add 2-3 s pause squats on the second working set.".to_owned());
    } else if lower.contains("bench") {
        suggestions.push("Add a 1 s pause at the chest or vary grip width.".to_owned());
    } else if lower.contains("deadlift") {
        suggestions.push("Add deficit deadlifts every other week.".to_owned());
    }

    if suggestions.is_empty() {
        suggestions.push(format!(
            "Keep {sets} sets of {reps} and record RPE to guide the next progression."
        ));
    }

    ProgressionPlan { goal, suggestions }
}

fn weight_increment(current: f64, compound: bool) -> f64 {
    match (current, compound) {
        (c, _) if c < 20.0 => 1.0,
        (c, true) if c < 60.0 => 2.5,
        (c, false) if c < 60.0 => 1.25,
        (_, true) => 5.0,
        (_, false) => 2.5,
    }
}
