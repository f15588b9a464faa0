// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Workload windows, flag cut-offs, intensity clamps, and notification durations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Workload analytics windows, smoothing factors, and flag boundaries
pub mod workload;

/// Intensity stepping rules per load type
pub mod intensity;

/// Schedule calendar layout
pub mod calendar {
    /// Days in one training week
    pub const DAYS_PER_WEEK: usize = 7;
    /// First valid week number (weeks are 1-based)
    pub const FIRST_WEEK: u32 = 1;
}

/// Notification display durations in milliseconds
pub mod notifications {
    /// Default duration for informational notices
    pub const DEFAULT_MS: u64 = 4_000;
    /// Duration of the impact preview notice shown before confirmation
    pub const IMPACT_PREVIEW_MS: u64 = 6_000;
    /// Duration of a first threshold breach warning
    pub const THRESHOLD_WARNING_MS: u64 = 7_000;
    /// Duration of an escalated (repeated) threshold breach
    pub const THRESHOLD_ESCALATED_MS: u64 = 10_000;
}

/// Engine timing and presentation limits
pub mod engine {
    /// Coalescing window for analytics refresh after an edit
    pub const ANALYTICS_DEBOUNCE_MS: u64 = 500;
    /// Maximum number of proposals surfaced per threshold check
    pub const MAX_DISPLAYED_PROPOSALS: usize = 3;
    /// Consecutive high-ACWR evaluations before severity escalates
    pub const HIGH_ACWR_ESCALATION_COUNT: u32 = 2;
}

/// Athlete feedback and deload detection
pub mod adaptive {
    /// Sessions of RPE feedback kept per exercise
    pub const FEEDBACK_HISTORY_SESSIONS: usize = 5;
    /// Lowest RPE accepted as session feedback
    pub const FEEDBACK_RPE_MIN: f64 = 1.0;
    /// Highest RPE accepted as session feedback
    pub const FEEDBACK_RPE_MAX: f64 = 10.0;
    /// RPE the load adjustments steer toward
    pub const DEFAULT_TARGET_RPE: f64 = 8.0;
    /// Distance from target inside which the load only creeps up
    pub const RPE_ON_TARGET_BAND: f64 = 0.5;
    /// Distance from target beyond which the adjustment is large
    pub const RPE_FAR_BAND: f64 = 1.5;
    /// Load fraction for a large adjustment
    pub const LARGE_ADJUSTMENT: f64 = 0.075;
    /// Load fraction for a moderate adjustment
    pub const MODERATE_ADJUSTMENT: f64 = 0.05;
    /// Load fraction added when RPE is on target
    pub const MAINTENANCE_ADJUSTMENT: f64 = 0.02;
    /// Weekly strain above this calls for an intensity deload
    pub const DELOAD_STRAIN: f64 = 5_000.0;
    /// Consecutive declining sessions before a full deload
    pub const DELOAD_DECLINE_SESSIONS: u32 = 3;
    /// Average RPE rise per session above which intensity is cut
    pub const DELOAD_RPE_RISE_PER_SESSION: f64 = 0.5;
}
