// ABOUTME: Steps an intensity prescription up or down within per-type bounds
// ABOUTME: RPE moves by half points, percent by five, weight by five percent with plate rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use forge_core::constants::intensity::{
    PERCENT_MAX, PERCENT_MIN, PERCENT_STEP, RPE_MAX, RPE_MIN, RPE_STEP,
    WEIGHT_GRANULARITY_HEAVY, WEIGHT_GRANULARITY_LIGHT, WEIGHT_GRANULARITY_MEDIUM,
    WEIGHT_HEAVY_THRESHOLD, WEIGHT_MEDIUM_THRESHOLD, WEIGHT_STEP_FRACTION,
};
use forge_core::models::LoadType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way to move intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityDirection {
    /// Harder
    Increase,
    /// Easier
    Decrease,
}

impl IntensityDirection {
    const fn sign(self) -> f64 {
        match self {
            Self::Increase => 1.0,
            Self::Decrease => -1.0,
        }
    }
}

/// Which bound blocked the step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Already at the floor
    Minimum,
    /// Already at the ceiling
    Maximum,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimum => f.write_str("minimum"),
            Self::Maximum => f.write_str("maximum"),
        }
    }
}

/// Result of one intensity step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntensityStep {
    /// New prescription value
    Changed(f64),
    /// Clamping left the value unchanged
    AtLimit(Boundary),
    /// Free-text prescriptions cannot be stepped
    Unsupported,
}

/// Step `value` of `load_type` one increment in `direction`
#[must_use]
pub fn step_intensity(load_type: LoadType, value: f64, direction: IntensityDirection) -> IntensityStep {
    let sign = direction.sign();
    let stepped = match load_type {
        LoadType::Rpe => sign.mul_add(RPE_STEP, value).clamp(RPE_MIN, RPE_MAX),
        LoadType::Percent => sign
            .mul_add(PERCENT_STEP, value)
            .clamp(PERCENT_MIN, PERCENT_MAX)
            .round(),
        LoadType::Weight => {
            let granularity = weight_granularity(value);
            let raw = value * sign.mul_add(WEIGHT_STEP_FRACTION, 1.0);
            round_hundredths((raw / granularity).round() * granularity).max(0.0)
        }
        LoadType::Text => return IntensityStep::Unsupported,
    };

    if (stepped - value).abs() < 1e-9 {
        let boundary = match direction {
            IntensityDirection::Increase => Boundary::Maximum,
            IntensityDirection::Decrease => Boundary::Minimum,
        };
        IntensityStep::AtLimit(boundary)
    } else {
        IntensityStep::Changed(stepped)
    }
}

/// Scale an entry's load proportionally to an intensity change
#[must_use]
pub fn estimate_load(original_load: f64, original_value: f64, new_value: f64) -> f64 {
    if original_value > 0.0 {
        (original_load * new_value / original_value).round().max(0.0)
    } else {
        original_load
    }
}

fn weight_granularity(value: f64) -> f64 {
    if value > WEIGHT_HEAVY_THRESHOLD {
        WEIGHT_GRANULARITY_HEAVY
    } else if value > WEIGHT_MEDIUM_THRESHOLD {
        WEIGHT_GRANULARITY_MEDIUM
    } else {
        WEIGHT_GRANULARITY_LIGHT
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed(step: IntensityStep) -> f64 {
        match step {
            IntensityStep::Changed(v) => v,
            other => panic!("expected change, got {other:?}"),
        }
    }

    #[test]
    fn test_rpe_steps_by_half_and_clamps() {
        assert!((changed(step_intensity(LoadType::Rpe, 8.0, IntensityDirection::Increase)) - 8.5).abs() < 1e-9);
        assert!((changed(step_intensity(LoadType::Rpe, 9.5, IntensityDirection::Increase)) - 10.0).abs() < 1e-9);
        assert_eq!(
            step_intensity(LoadType::Rpe, 10.0, IntensityDirection::Increase),
            IntensityStep::AtLimit(Boundary::Maximum)
        );
        assert_eq!(
            step_intensity(LoadType::Rpe, 5.0, IntensityDirection::Decrease),
            IntensityStep::AtLimit(Boundary::Minimum)
        );
    }

    #[test]
    fn test_percent_steps_by_five() {
        assert!((changed(step_intensity(LoadType::Percent, 75.0, IntensityDirection::Increase)) - 80.0).abs() < 1e-9);
        assert!((changed(step_intensity(LoadType::Percent, 42.0, IntensityDirection::Decrease)) - 40.0).abs() < 1e-9);
        assert_eq!(
            step_intensity(LoadType::Percent, 100.0, IntensityDirection::Increase),
            IntensityStep::AtLimit(Boundary::Maximum)
        );
    }

    #[test]
    fn test_weight_rounds_to_granularity() {
        // 100 * 1.05 = 105, already on the 0.5 grid
        assert!((changed(step_intensity(LoadType::Weight, 100.0, IntensityDirection::Increase)) - 105.0).abs() < 1e-9);
        // 10 * 0.95 = 9.5 on the 0.25 grid
        assert!((changed(step_intensity(LoadType::Weight, 10.0, IntensityDirection::Decrease)) - 9.5).abs() < 1e-9);
        // 3 * 1.05 = 3.15 rounds to 3.2 on the 0.1 grid
        assert!((changed(step_intensity(LoadType::Weight, 3.0, IntensityDirection::Increase)) - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_text_is_unsupported() {
        assert_eq!(
            step_intensity(LoadType::Text, 0.0, IntensityDirection::Increase),
            IntensityStep::Unsupported
        );
    }

    #[test]
    fn test_estimate_load_is_proportional() {
        assert!((estimate_load(400.0, 8.0, 8.5) - 425.0).abs() < f64::EPSILON);
        assert!((estimate_load(400.0, 0.0, 5.0) - 400.0).abs() < f64::EPSILON);
    }
}
