// ABOUTME: Intensity stepping constants for RPE, percent-of-max, and absolute weight
// ABOUTME: Step sizes, clamp bounds, and rounding granularity per load type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

/// RPE change per step
pub const RPE_STEP: f64 = 0.5;
/// Lowest prescribable RPE
pub const RPE_MIN: f64 = 5.0;
/// Highest prescribable RPE
pub const RPE_MAX: f64 = 10.0;

/// Percent-of-max change per step
pub const PERCENT_STEP: f64 = 5.0;
/// Lowest prescribable percent of max
pub const PERCENT_MIN: f64 = 40.0;
/// Highest prescribable percent of max
pub const PERCENT_MAX: f64 = 100.0;

/// Fractional weight change per step
pub const WEIGHT_STEP_FRACTION: f64 = 0.05;
/// Above this weight, round to `WEIGHT_GRANULARITY_HEAVY`
pub const WEIGHT_HEAVY_THRESHOLD: f64 = 20.0;
/// Above this weight, round to `WEIGHT_GRANULARITY_MEDIUM`
pub const WEIGHT_MEDIUM_THRESHOLD: f64 = 5.0;
/// Rounding increment for heavy loads
pub const WEIGHT_GRANULARITY_HEAVY: f64 = 0.5;
/// Rounding increment for medium loads
pub const WEIGHT_GRANULARITY_MEDIUM: f64 = 0.25;
/// Rounding increment for light loads
pub const WEIGHT_GRANULARITY_LIGHT: f64 = 0.1;
