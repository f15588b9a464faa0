// ABOUTME: Weekly training monotony and strain over exactly seven daily loads
// ABOUTME: Constant weeks produce infinite monotony, which always classifies as high
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::{round_to, AnalyticsError};
use forge_core::constants::workload::{
    MONOTONY_HIGH, MONOTONY_WATCH, MONOTONY_WINDOW_DAYS, STRAIN_HIGH, STRAIN_WATCH,
};
use serde::{Deserialize, Serialize};

/// Monotony/strain classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonotonyFlag {
    /// Enough day-to-day variation
    #[default]
    Ok,
    /// Approaching the high band
    Watch,
    /// Monotony above 2, strain above 4500, or a constant week
    High,
}

impl MonotonyFlag {
    /// Classify a monotony/strain pair
    #[must_use]
    pub fn classify(monotony: f64, strain: f64) -> Self {
        if monotony.is_infinite() || monotony > MONOTONY_HIGH || strain > STRAIN_HIGH {
            Self::High
        } else if monotony > MONOTONY_WATCH || strain > STRAIN_WATCH {
            Self::Watch
        } else {
            Self::Ok
        }
    }
}

/// Monotony calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonotonyResult {
    /// Mean over population standard deviation, two decimals
    pub monotony: f64,
    /// Monotony times weekly load, whole number
    pub strain: f64,
    /// Risk band
    pub flag: MonotonyFlag,
}

/// Compute monotony and strain for one week of daily loads.
///
/// A week without variation has `sd == 0`; monotony is then +∞ and strain is
/// +∞ too unless the week is empty of load, in which case it is 0.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidWindowSize`] unless exactly 7 values are given
pub fn monotony(week: &[f64]) -> Result<MonotonyResult, AnalyticsError> {
    if week.len() != MONOTONY_WINDOW_DAYS {
        return Err(AnalyticsError::InvalidWindowSize {
            expected: MONOTONY_WINDOW_DAYS,
            actual: week.len(),
        });
    }

    let count = week.len() as f64;
    let sum: f64 = week.iter().sum();
    let mean = sum / count;
    let variance = week.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    let sd = variance.sqrt();

    let (monotony, strain) = if sd > 0.0 {
        let monotony = round_to(mean / sd, 2);
        (monotony, round_to(monotony * sum, 0))
    } else if sum > 0.0 {
        (f64::INFINITY, f64::INFINITY)
    } else {
        (f64::INFINITY, 0.0)
    };

    Ok(MonotonyResult {
        monotony,
        strain,
        flag: MonotonyFlag::classify(monotony, strain),
    })
}
