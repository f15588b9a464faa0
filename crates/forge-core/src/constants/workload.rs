// ABOUTME: Workload analytics constants for ACWR and monotony/strain calculations
// ABOUTME: Window sizes, EWMA smoothing factors, and traffic-light flag boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

/// Acute window length in days
pub const ACUTE_WINDOW_DAYS: usize = 7;

/// Chronic window length in days (also the minimum series length for ACWR)
pub const CHRONIC_WINDOW_DAYS: usize = 28;

/// Monotony window length in days
pub const MONOTONY_WINDOW_DAYS: usize = 7;

/// EWMA smoothing factor for the acute window
pub const ACUTE_ALPHA: f64 = 0.5;

/// EWMA smoothing factor for the chronic window
pub const CHRONIC_ALPHA: f64 = 0.1;

/// ACWR below this is red (undertraining)
pub const ACWR_RED_LOW: f64 = 0.8;

/// ACWR above this is red (spike risk)
pub const ACWR_RED_HIGH: f64 = 1.5;

/// ACWR below this is amber
pub const ACWR_AMBER_LOW: f64 = 0.9;

/// ACWR above this is amber
pub const ACWR_AMBER_HIGH: f64 = 1.3;

/// Monotony above this is flagged high
pub const MONOTONY_HIGH: f64 = 2.0;

/// Monotony above this is flagged watch
pub const MONOTONY_WATCH: f64 = 1.7;

/// Weekly strain above this is flagged high
pub const STRAIN_HIGH: f64 = 4_500.0;

/// Weekly strain above this is flagged watch
pub const STRAIN_WATCH: f64 = 3_500.0;
