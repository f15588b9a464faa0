// ABOUTME: Exercise swap suggestions ranked by shared primary muscles
// ABOUTME: Filters by swap reason, difficulty tier, and the active equipment profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use forge_core::models::{Difficulty, EquipmentProfile, ExerciseMetadata};
use serde::{Deserialize, Serialize};

/// Maximum number of swap candidates returned
const MAX_SWAP_SUGGESTIONS: usize = 5;

/// Weeks in a row after which an exercise should be rotated
const ROTATION_WEEKS: usize = 6;

/// Why the athlete wants a different exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapReason {
    /// Plain alternative
    #[default]
    Variation,
    /// Current equipment unavailable
    Equipment,
    /// Needs an easier movement
    Recovery,
    /// Ready for a harder movement
    Progression,
    /// Exercise has been used for too long
    Rotation,
}

/// Candidate replacement exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapSuggestion {
    /// Candidate exercise
    pub exercise: ExerciseMetadata,
    /// Primary muscles shared with the original
    pub shared_muscles: usize,
    /// Reason the candidate was searched for
    pub reason: SwapReason,
}

/// Rank replacements for `base` from `catalog`.
///
/// Candidates must share at least one primary muscle and be usable under
/// `profile`. Equipment swaps avoid the original's equipment, recovery swaps
/// cap difficulty, progression swaps raise it. At most five are returned,
/// most overlapping first.
#[must_use]
pub fn suggest_swaps(
    base: &ExerciseMetadata,
    catalog: &[ExerciseMetadata],
    reason: SwapReason,
    profile: EquipmentProfile,
) -> Vec<SwapSuggestion> {
    let mut candidates: Vec<SwapSuggestion> = catalog
        .iter()
        .filter(|candidate| candidate.id != base.id)
        .filter(|candidate| profile.permits(candidate))
        .filter(|candidate| match reason {
            SwapReason::Equipment => !candidate.uses_any(&base.equipment),
            SwapReason::Recovery => candidate.difficulty <= easier_than(base.difficulty),
            SwapReason::Progression => candidate.difficulty >= harder_than(base.difficulty),
            SwapReason::Variation | SwapReason::Rotation => true,
        })
        .filter_map(|candidate| {
            let shared_muscles = base.primary_overlap(candidate);
            (shared_muscles > 0).then(|| SwapSuggestion {
                exercise: candidate.clone(),
                shared_muscles,
                reason,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.shared_muscles.cmp(&a.shared_muscles));
    candidates.truncate(MAX_SWAP_SUGGESTIONS);
    candidates
}

const fn easier_than(difficulty: Difficulty) -> Difficulty {
    match difficulty {
        Difficulty::Advanced => Difficulty::Intermediate,
        Difficulty::Intermediate | Difficulty::Beginner => Difficulty::Beginner,
    }
}

const fn harder_than(difficulty: Difficulty) -> Difficulty {
    match difficulty {
        Difficulty::Beginner => Difficulty::Intermediate,
        Difficulty::Intermediate | Difficulty::Advanced => Difficulty::Advanced,
    }
}

/// Rotation recommendation for one exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationAdvice {
    /// Consecutive weeks ending at the latest week the exercise appears
    pub consecutive_weeks: usize,
    /// Whether the exercise is due for rotation
    pub should_rotate: bool,
}

/// Check whether an exercise used in `weeks` has run long enough to rotate
#[must_use]
pub fn check_rotation(weeks: &[u32]) -> RotationAdvice {
    let mut sorted = weeks.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let consecutive_weeks = sorted
        .iter()
        .rev()
        .zip(sorted.iter().rev().skip(1))
        .take_while(|(later, earlier)| **later == **earlier + 1)
        .count()
        + usize::from(!sorted.is_empty());

    RotationAdvice {
        consecutive_weeks,
        should_rotate: consecutive_weeks >= ROTATION_WEEKS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(id: &str, muscles: &[&str], equipment: &[&str], difficulty: Difficulty) -> ExerciseMetadata {
        ExerciseMetadata {
            id: id.into(),
            name: id.replace('_', " "),
            primary_muscles: muscles.iter().map(|m| (*m).to_owned()).collect(),
            secondary_muscles: vec![],
            equipment: equipment.iter().map(|e| (*e).to_owned()).collect(),
            difficulty,
        }
    }

    fn catalog() -> Vec<ExerciseMetadata> {
        vec![
            exercise("back_squat", &["quadriceps", "glutes"], &["barbell", "rack"], Difficulty::Intermediate),
            exercise("goblet_squat", &["quadriceps", "glutes"], &["dumbbell"], Difficulty::Beginner),
            exercise("front_squat", &["quadriceps"], &["barbell", "rack"], Difficulty::Advanced),
            exercise("split_squat", &["quadriceps", "glutes"], &[], Difficulty::Intermediate),
            exercise("leg_curl", &["hamstrings"], &["machine"], Difficulty::Beginner),
        ]
    }

    #[test]
    fn test_variation_ranks_by_overlap() {
        let catalog = catalog();
        let swaps = suggest_swaps(&catalog[0], &catalog, SwapReason::Variation, EquipmentProfile::CommercialGym);
        let ids: Vec<&str> = swaps.iter().map(|s| s.exercise.id.as_str()).collect();
        assert_eq!(ids, ["goblet_squat", "split_squat", "front_squat"]);
    }

    #[test]
    fn test_equipment_reason_avoids_original_equipment() {
        let catalog = catalog();
        let swaps = suggest_swaps(&catalog[0], &catalog, SwapReason::Equipment, EquipmentProfile::CommercialGym);
        assert!(swaps.iter().all(|s| !s.exercise.uses_any(&catalog[0].equipment)));
        assert_eq!(swaps.len(), 2);
    }

    #[test]
    fn test_recovery_and_progression_adjust_difficulty() {
        let catalog = catalog();
        let easier = suggest_swaps(&catalog[0], &catalog, SwapReason::Recovery, EquipmentProfile::CommercialGym);
        assert_eq!(easier.len(), 1);
        assert_eq!(easier[0].exercise.id, "goblet_squat");

        let harder = suggest_swaps(&catalog[0], &catalog, SwapReason::Progression, EquipmentProfile::CommercialGym);
        assert_eq!(harder.len(), 1);
        assert_eq!(harder[0].exercise.id, "front_squat");
    }

    #[test]
    fn test_profile_filters_candidates() {
        let catalog = catalog();
        let swaps = suggest_swaps(&catalog[0], &catalog, SwapReason::Variation, EquipmentProfile::Minimal);
        assert_eq!(swaps.len(), 1);
        assert_eq!(swaps[0].exercise.id, "split_squat");
    }

    #[test]
    fn test_rotation_counts_trailing_run() {
        assert_eq!(check_rotation(&[]).consecutive_weeks, 0);
        assert_eq!(check_rotation(&[1, 2, 4, 5, 6]).consecutive_weeks, 3);
        let advice = check_rotation(&[3, 1, 2, 4, 5, 6, 6]);
        assert_eq!(advice.consecutive_weeks, 6);
        assert!(advice.should_rotate);
    }
}
