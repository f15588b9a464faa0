// ABOUTME: Impact simulator that re-runs workload analytics on a hypothetically edited series
// ABOUTME: Applies change descriptors to a copy of the load series and never fails hard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! # Impact Simulator
//!
//! Descriptors are resolved to a day index through their `(week, day)` slot or a
//! raw index. Descriptors that cannot be resolved, or that point past the end of
//! the series, are skipped with a warning and counted in
//! [`PredictedImpact::skipped_changes`]. Loads never go below zero.

use crate::workload::{AcwrFlag, AnalyticsSnapshot, MonotonyFlag};
use forge_core::errors::AppError;
use forge_core::models::{Change, ChangeDescriptor, LoadSeries};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Predicted effect of applying a set of changes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedImpact {
    /// Total load after the changes minus total load before
    pub estimated_load_change: f64,
    /// ACWR after the changes, `None` when unavailable
    #[serde(rename = "predictedACWR")]
    pub predicted_acwr: Option<f64>,
    /// ACWR band after the changes
    #[serde(rename = "predictedACWRFlag")]
    pub predicted_acwr_flag: AcwrFlag,
    /// Weekly monotony after the changes
    pub predicted_monotony: Option<f64>,
    /// Monotony band after the changes
    pub predicted_monotony_flag: MonotonyFlag,
    /// Weekly strain after the changes
    pub predicted_strain: Option<f64>,
    /// Descriptors that could not be resolved
    pub skipped_changes: usize,
}

impl PredictedImpact {
    /// Impact with no load change and neutral flags
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }

    fn from_snapshot(snapshot: &AnalyticsSnapshot, estimated_load_change: f64) -> Self {
        Self {
            estimated_load_change,
            predicted_acwr: snapshot.acwr_ratio,
            predicted_acwr_flag: snapshot.acwr_flag,
            predicted_monotony: snapshot.monotony_value,
            predicted_monotony_flag: snapshot.monotony_flag,
            predicted_strain: snapshot.strain_value,
            skipped_changes: 0,
        }
    }
}

impl fmt::Display for PredictedImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metric = |value: Option<f64>| {
            value.map_or_else(|| "N/A".to_owned(), |v| format!("{v:.2}"))
        };
        write!(
            f,
            "Est. Load Change: {:+.0}, Pred. ACWR: {}, Pred. Monotony: {}",
            self.estimated_load_change,
            metric(self.predicted_acwr),
            metric(self.predicted_monotony)
        )
    }
}

/// Re-runs analytics on a modified copy of the current series
#[derive(Debug, Clone, Default)]
pub struct ImpactSimulator {
    history: LoadSeries,
}

impl ImpactSimulator {
    /// Create a simulator that prepends `history` before windowed analytics
    #[must_use]
    pub const fn new(history: LoadSeries) -> Self {
        Self { history }
    }

    /// Historical prefix in use
    #[must_use]
    pub const fn history(&self) -> &LoadSeries {
        &self.history
    }

    /// Predict the metrics after applying `changes` to `current`
    #[must_use]
    pub fn simulate(&self, changes: &[ChangeDescriptor], current: &LoadSeries) -> PredictedImpact {
        let (modified, skipped) = Self::apply_all(changes, current);
        let estimated_load_change = modified.total() - current.total();
        let snapshot = AnalyticsSnapshot::compute(&self.history, &modified);

        debug!(
            changes = changes.len(),
            skipped,
            estimated_load_change,
            "simulated impact"
        );

        PredictedImpact {
            skipped_changes: skipped,
            ..PredictedImpact::from_snapshot(&snapshot, estimated_load_change)
        }
    }

    /// Apply `changes` to a copy of `current`, returning the copy and the skip count
    #[must_use]
    pub fn apply_all(changes: &[ChangeDescriptor], current: &LoadSeries) -> (LoadSeries, usize) {
        let mut modified = current.clone();
        let mut skipped = 0;
        for change in changes {
            if let Err(e) = apply_change(&mut modified, change) {
                warn!(change = %change.describe(), error = %e, "skipping change during simulation");
                skipped += 1;
            }
        }
        (modified, skipped)
    }
}

fn apply_change(series: &mut LoadSeries, change: &ChangeDescriptor) -> Result<(), AppError> {
    if !change.load_delta().is_finite() {
        return Err(AppError::invalid_input("non-finite load in change descriptor"));
    }
    let index = change
        .target_index()
        .ok_or_else(|| AppError::unresolvable_reference(change.describe()))?;
    let current = series
        .get(index)
        .ok_or_else(|| AppError::unresolvable_reference(format!("day index {index}")))?;

    series.set(index, (current + change.load_delta()).max(0.0));

    if let Change::Move { to, load } = change.change {
        match to.load_index().and_then(|target| Some((target, series.get(target)?))) {
            Some((target, existing)) => {
                series.set(target, existing + load);
            }
            None => warn!(destination = %to, "move destination outside the series, load dropped"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::{acwr, monotony};
    use chrono::Weekday;
    use forge_core::models::DaySlot;

    fn four_weeks() -> LoadSeries {
        LoadSeries::new(
            (0..28)
                .map(|i| if i % 7 == 6 { 0.0 } else { 300.0 + f64::from(i % 3) * 50.0 })
                .collect(),
        )
    }

    #[test]
    fn test_empty_changes_match_direct_analytics() {
        let series = four_weeks();
        let impact = ImpactSimulator::default().simulate(&[], &series);
        let direct_acwr = acwr(series.as_slice()).unwrap();
        let direct_monotony = monotony(series.trailing(7)).unwrap();

        assert!(impact.estimated_load_change.abs() < f64::EPSILON);
        assert_eq!(impact.predicted_acwr, Some(direct_acwr.ratio));
        assert_eq!(impact.predicted_acwr_flag, direct_acwr.flag);
        assert_eq!(impact.predicted_monotony, Some(direct_monotony.monotony));
        assert_eq!(impact.predicted_strain, Some(direct_monotony.strain));
        assert_eq!(impact.skipped_changes, 0);
    }

    #[test]
    fn test_remove_clamps_at_zero() {
        let series = LoadSeries::new(vec![100.0; 7]);
        let slot = DaySlot::new(1, Weekday::Wed);
        let impact = ImpactSimulator::default()
            .simulate(&[ChangeDescriptor::clear_day_load(slot, 250.0)], &series);
        assert!((impact.estimated_load_change + 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unresolvable_changes_are_skipped() {
        let series = LoadSeries::new(vec![100.0; 7]);
        let changes = [
            ChangeDescriptor::at_index(40, 50.0),
            ChangeDescriptor {
                slot: None,
                ..ChangeDescriptor::clear_day_load(DaySlot::new(1, Weekday::Mon), 10.0)
            },
            ChangeDescriptor::at_index(2, 25.0),
        ];
        let impact = ImpactSimulator::default().simulate(&changes, &series);
        assert_eq!(impact.skipped_changes, 2);
        assert!((impact.estimated_load_change - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_move_is_load_neutral() {
        let series = LoadSeries::new(vec![100.0, 0.0, 100.0, 0.0, 100.0, 0.0, 0.0]);
        let change = ChangeDescriptor {
            entry: None,
            slot: Some(DaySlot::new(1, Weekday::Mon)),
            load_index: None,
            change: Change::Move {
                to: DaySlot::new(1, Weekday::Tue),
                load: 100.0,
            },
        };
        let (modified, skipped) = ImpactSimulator::apply_all(&[change], &series);
        assert_eq!(skipped, 0);
        assert_eq!(modified.as_slice()[..2], [0.0, 100.0]);
        assert!((modified.total() - series.total()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_history_enables_acwr_for_short_program() {
        let simulator = ImpactSimulator::new(LoadSeries::new(vec![300.0; 21]));
        let series = LoadSeries::new(vec![300.0; 7]);
        let impact = simulator.simulate(&[ChangeDescriptor::at_index(6, 300.0)], &series);
        assert!(impact.predicted_acwr.is_some());
        assert!((impact.estimated_load_change - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_marks_unavailable_metrics() {
        let impact = PredictedImpact {
            estimated_load_change: -45.0,
            ..PredictedImpact::neutral()
        };
        assert_eq!(
            impact.to_string(),
            "Est. Load Change: -45, Pred. ACWR: N/A, Pred. Monotony: N/A"
        );
    }
}
