// ABOUTME: Adaptive coaching signals derived from athlete feedback and workload metrics
// ABOUTME: RPE-driven load adjustments per exercise and deload strategy selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Adaptive coaching.
//!
//! [`PerformanceHistory`] is plain data; the engine owns one instance per
//! open program and feeds its fatigue signals into [`detect_deload_need`].

mod deload;
mod feedback;

pub use deload::{detect_deload_need, DeloadAssessment, DeloadMetrics, DeloadStrategy};
pub use feedback::{
    AdjustmentBand, ExerciseHistory, FatigueSignals, LoadAdjustment, PerformanceHistory,
};
