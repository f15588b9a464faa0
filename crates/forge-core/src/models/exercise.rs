// ABOUTME: Exercise library metadata and equipment profile models
// ABOUTME: Difficulty tiers and equipment availability used by swap suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exercise difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Entry level
    Beginner,
    /// Some training history required
    Intermediate,
    /// Technically demanding
    Advanced,
}

/// Exercise library record as returned by the lookup collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseMetadata {
    /// Library identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Primary muscles worked
    #[serde(default)]
    pub primary_muscles: Vec<String>,
    /// Secondary muscles worked
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    /// Required equipment; empty means bodyweight
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Difficulty tier
    pub difficulty: Difficulty,
}

impl ExerciseMetadata {
    /// Count of primary muscles shared with `other`
    #[must_use]
    pub fn primary_overlap(&self, other: &Self) -> usize {
        self.primary_muscles
            .iter()
            .filter(|muscle| {
                other
                    .primary_muscles
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(muscle))
            })
            .count()
    }

    /// Whether any required equipment matches `equipment`
    #[must_use]
    pub fn uses_any(&self, equipment: &[String]) -> bool {
        self.equipment
            .iter()
            .any(|item| equipment.iter().any(|other| other.eq_ignore_ascii_case(item)))
    }
}

/// Equipment available to the athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentProfile {
    /// Full commercial gym, no restriction
    #[default]
    CommercialGym,
    /// Dumbbells, bands, and a bench
    HomeBasic,
    /// Home gym with barbell and rack
    HomeAdvanced,
    /// Hotel room or travel kit
    Travel,
    /// Bodyweight only
    Minimal,
}

impl EquipmentProfile {
    /// Parse a normalized profile key such as `home_basic`
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized: String = key
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "commercial_gym" | "commercialgym" => Some(Self::CommercialGym),
            "home_basic" | "homebasic" => Some(Self::HomeBasic),
            "home_advanced" | "homeadvanced" => Some(Self::HomeAdvanced),
            "travel" => Some(Self::Travel),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Equipment available under this profile; `None` means unrestricted
    #[must_use]
    pub const fn available_equipment(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::CommercialGym => None,
            Self::HomeAdvanced => Some(&[
                "barbell",
                "dumbbell",
                "kettlebell",
                "bench",
                "rack",
                "pull-up bar",
                "band",
                "bodyweight",
            ]),
            Self::HomeBasic => Some(&["dumbbell", "band", "bench", "bodyweight"]),
            Self::Travel => Some(&["band", "bodyweight"]),
            Self::Minimal => Some(&["bodyweight"]),
        }
    }

    /// Whether an exercise can be performed with this profile's equipment
    #[must_use]
    pub fn permits(&self, exercise: &ExerciseMetadata) -> bool {
        let Some(available) = self.available_equipment() else {
            return true;
        };
        exercise.equipment.iter().all(|item| {
            available
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(item))
        })
    }
}

impl fmt::Display for EquipmentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CommercialGym => "commercial gym",
            Self::HomeBasic => "home basic",
            Self::HomeAdvanced => "home advanced",
            Self::Travel => "travel",
            Self::Minimal => "minimal",
        };
        f.write_str(label)
    }
}
