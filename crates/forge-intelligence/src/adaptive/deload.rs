// ABOUTME: Deload detection from workload analytics and athlete fatigue signals
// ABOUTME: Picks one deload strategy by fixed priority: ACWR, monotony, strain, decline, RPE drift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::feedback::FatigueSignals;
use crate::config::ThresholdConfig;
use crate::workload::AnalyticsSnapshot;
use forge_core::constants::adaptive::{
    DELOAD_DECLINE_SESSIONS, DELOAD_RPE_RISE_PER_SESSION, DELOAD_STRAIN,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a deload week should be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeloadStrategy {
    /// Cut sets and total volume
    Volume,
    /// Vary the weekly layout
    Schedule,
    /// Lower prescribed intensity
    Intensity,
    /// Reduce volume and intensity together
    Full,
}

impl fmt::Display for DeloadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Volume => "volume",
            Self::Schedule => "schedule",
            Self::Intensity => "intensity",
            Self::Full => "full",
        })
    }
}

/// Inputs to deload detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeloadMetrics {
    /// ACWR, if enough history exists
    pub acwr: Option<f64>,
    /// Weekly monotony, if a full week exists
    pub monotony: Option<f64>,
    /// Weekly strain, if a full week exists
    pub strain: Option<f64>,
    /// Consecutive sessions with fewer reps completed
    pub performance_decline_duration: u32,
    /// Average RPE rise per session
    pub rpe_increase_rate: f64,
}

impl DeloadMetrics {
    /// Combine schedule analytics with feedback-derived fatigue
    #[must_use]
    pub const fn from_snapshot(snapshot: &AnalyticsSnapshot, fatigue: FatigueSignals) -> Self {
        Self {
            acwr: snapshot.acwr_ratio,
            monotony: snapshot.monotony_value,
            strain: snapshot.strain_value,
            performance_decline_duration: fatigue.performance_decline_duration,
            rpe_increase_rate: fatigue.rpe_increase_rate,
        }
    }
}

/// Outcome of deload detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeloadAssessment {
    /// Whether a deload is recommended
    pub needs_deload: bool,
    /// Recommended strategy when a deload is needed
    pub strategy: Option<DeloadStrategy>,
    /// Why
    pub reason: String,
}

impl DeloadAssessment {
    fn recommend(strategy: DeloadStrategy, reason: String) -> Self {
        Self {
            needs_deload: true,
            strategy: Some(strategy),
            reason,
        }
    }
}

/// Decide whether a deload is due; the first matching rule wins.
///
/// ACWR and monotony use the configured thresholds. Unavailable metrics never
/// trigger a deload.
#[must_use]
pub fn detect_deload_need(metrics: &DeloadMetrics, thresholds: &ThresholdConfig) -> DeloadAssessment {
    if let Some(acwr) = metrics.acwr.filter(|&v| v > thresholds.high_acwr) {
        return DeloadAssessment::recommend(
            DeloadStrategy::Volume,
            format!("ACWR is high ({acwr:.2}) - risk of overtraining"),
        );
    }
    if let Some(monotony) = metrics.monotony.filter(|&v| v > thresholds.high_monotony) {
        return DeloadAssessment::recommend(
            DeloadStrategy::Schedule,
            format!("Training monotony is high ({monotony:.2}) - need schedule variety"),
        );
    }
    if let Some(strain) = metrics.strain.filter(|&v| v > DELOAD_STRAIN) {
        return DeloadAssessment::recommend(
            DeloadStrategy::Intensity,
            format!("Training strain is high ({strain:.0}) - reduce intensity"),
        );
    }
    if metrics.performance_decline_duration >= DELOAD_DECLINE_SESSIONS {
        return DeloadAssessment::recommend(
            DeloadStrategy::Full,
            format!(
                "Performance decline over {} sessions - full deload needed",
                metrics.performance_decline_duration
            ),
        );
    }
    if metrics.rpe_increase_rate > DELOAD_RPE_RISE_PER_SESSION {
        return DeloadAssessment::recommend(
            DeloadStrategy::Intensity,
            format!(
                "RPE increasing rapidly ({:.2} per session) - reduce intensity",
                metrics.rpe_increase_rate
            ),
        );
    }
    DeloadAssessment {
        needs_deload: false,
        strategy: None,
        reason: "No deload needed.".to_owned(),
    }
}
