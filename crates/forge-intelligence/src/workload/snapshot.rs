// ABOUTME: Analytics snapshot computed after every schedule-affecting change
// ABOUTME: Combines historical prefix and program series; unavailable metrics become None
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::{acwr, monotony, AcwrFlag, MonotonyFlag};
use forge_core::constants::workload::{CHRONIC_WINDOW_DAYS, MONOTONY_WINDOW_DAYS};
use forge_core::models::LoadSeries;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Current risk metrics as pushed to the threshold monitor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    /// Rounded ACWR, `None` when fewer than 28 days are known
    pub acwr_ratio: Option<f64>,
    /// ACWR band (green when unavailable)
    pub acwr_flag: AcwrFlag,
    /// Weekly monotony, `None` when the program has fewer than 7 days
    pub monotony_value: Option<f64>,
    /// Monotony band (ok when unavailable)
    pub monotony_flag: MonotonyFlag,
    /// Weekly strain, `None` when monotony is unavailable
    pub strain_value: Option<f64>,
}

impl AnalyticsSnapshot {
    /// Compute metrics for `series`, using `prefix` as history for the chronic window.
    ///
    /// ACWR runs on the trailing 28 days of `prefix ++ series`; monotony runs on
    /// the trailing 7 days of `series` alone.
    #[must_use]
    pub fn compute(prefix: &LoadSeries, series: &LoadSeries) -> Self {
        let mut snapshot = Self::default();

        let combined = LoadSeries::concat(prefix, series);
        if combined.len() >= CHRONIC_WINDOW_DAYS {
            match acwr(combined.trailing(CHRONIC_WINDOW_DAYS)) {
                Ok(result) => {
                    snapshot.acwr_ratio = Some(result.ratio);
                    snapshot.acwr_flag = result.flag;
                }
                Err(e) => warn!(error = %e, "ACWR unavailable"),
            }
        }

        if series.len() >= MONOTONY_WINDOW_DAYS {
            match monotony(series.trailing(MONOTONY_WINDOW_DAYS)) {
                Ok(result) => {
                    snapshot.monotony_value = Some(result.monotony);
                    snapshot.monotony_flag = result.flag;
                    snapshot.strain_value = Some(result.strain);
                }
                Err(e) => warn!(error = %e, "monotony unavailable"),
            }
        }

        snapshot
    }

    /// Whether neither metric could be computed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.acwr_ratio.is_none() && self.monotony_value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_completes_chronic_window() {
        let prefix = LoadSeries::new(vec![300.0; 14]);
        let series = LoadSeries::new(vec![300.0; 14]);
        let snapshot = AnalyticsSnapshot::compute(&prefix, &series);
        assert_eq!(snapshot.acwr_ratio, Some(1.0));

        let without_prefix = AnalyticsSnapshot::compute(&LoadSeries::default(), &series);
        assert_eq!(without_prefix.acwr_ratio, None);
        assert_eq!(without_prefix.acwr_flag, AcwrFlag::Green);
    }

    #[test]
    fn test_monotony_ignores_prefix() {
        let prefix = LoadSeries::new(vec![100.0; 30]);
        let series = LoadSeries::new(vec![200.0; 5]);
        let snapshot = AnalyticsSnapshot::compute(&prefix, &series);
        assert!(snapshot.acwr_ratio.is_some());
        assert_eq!(snapshot.monotony_value, None);
        assert_eq!(snapshot.monotony_flag, MonotonyFlag::Ok);
    }
}
