// ABOUTME: Acute:chronic workload ratio from exponentially-weighted moving averages
// ABOUTME: 7-day acute window (alpha 0.5) against a 28-day chronic window (alpha 0.1)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::{round_to, AnalyticsError};
use forge_core::constants::workload::{
    ACUTE_ALPHA, ACUTE_WINDOW_DAYS, ACWR_AMBER_HIGH, ACWR_AMBER_LOW, ACWR_RED_HIGH, ACWR_RED_LOW,
    CHRONIC_ALPHA, CHRONIC_WINDOW_DAYS,
};
use serde::{Deserialize, Serialize};

/// Traffic-light classification of an ACWR value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcwrFlag {
    /// Within the 0.9-1.3 sweet spot
    #[default]
    Green,
    /// Drifting towards a risk band
    Amber,
    /// Below 0.8 or above 1.5
    Red,
}

impl AcwrFlag {
    /// Classify a rounded ratio
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < ACWR_RED_LOW || ratio > ACWR_RED_HIGH {
            Self::Red
        } else if ratio < ACWR_AMBER_LOW || ratio > ACWR_AMBER_HIGH {
            Self::Amber
        } else {
            Self::Green
        }
    }
}

/// ACWR calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcwrResult {
    /// Acute/chronic ratio rounded to two decimals
    pub ratio: f64,
    /// Risk band
    pub flag: AcwrFlag,
    /// Acute EWMA over the trailing 7 days
    pub acute: f64,
    /// Chronic EWMA over the trailing 28 days
    pub chronic: f64,
}

/// Compute the acute:chronic workload ratio of a daily load series.
///
/// Each EWMA is seeded with the most recent value of its window and folded back
/// towards the oldest, `ewma = α·value + (1−α)·ewma`. A zero chronic load gives
/// a ratio of 0 when the acute load is also zero and +∞ otherwise.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] when the series holds fewer than 28 days
pub fn acwr(series: &[f64]) -> Result<AcwrResult, AnalyticsError> {
    if series.len() < CHRONIC_WINDOW_DAYS {
        return Err(AnalyticsError::InsufficientData {
            required: CHRONIC_WINDOW_DAYS,
            actual: series.len(),
        });
    }

    let acute = ewma(trailing(series, ACUTE_WINDOW_DAYS), ACUTE_ALPHA);
    let chronic = ewma(trailing(series, CHRONIC_WINDOW_DAYS), CHRONIC_ALPHA);

    let ratio = if chronic > 0.0 {
        round_to(acute / chronic, 2)
    } else if acute > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    Ok(AcwrResult {
        ratio,
        flag: AcwrFlag::from_ratio(ratio),
        acute,
        chronic,
    })
}

fn trailing(series: &[f64], days: usize) -> &[f64] {
    &series[series.len().saturating_sub(days)..]
}

fn ewma(window: &[f64], alpha: f64) -> f64 {
    window
        .iter()
        .rev()
        .copied()
        .reduce(|previous, value| alpha.mul_add(value, (1.0 - alpha) * previous))
        .unwrap_or(0.0)
}
