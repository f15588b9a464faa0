// ABOUTME: Phase progression smoothing based on week-over-week load deltas
// ABOUTME: Flags deltas more than one standard deviation from the mean and nudges the week after
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::generator::scale_days;
use super::{Proposal, ProposalGenerator, ProposalKind};
use forge_core::models::LoadSeries;
use tracing::debug;

impl ProposalGenerator {
    /// Smoothing proposals for the weeks `start_week..=end_week` of a phase.
    ///
    /// Week totals give week-over-week deltas. A delta further than one
    /// standard deviation from the mean delta is anomalous: the week it leads
    /// into is increased after a drop or decreased after a spike. Fewer than
    /// two weeks of data yields an informational proposal.
    #[must_use]
    pub fn propose_phase_optimizations(
        &self,
        phase_name: &str,
        start_week: u32,
        end_week: u32,
        series: &LoadSeries,
    ) -> Vec<Proposal> {
        let weeks: Vec<u32> = (start_week..=end_week)
            .filter(|week| series.week(*week).is_some())
            .collect();
        if weeks.len() < 2 {
            return vec![Proposal::message(format!(
                "Phase \"{phase_name}\" needs at least two weeks of data to review its progression."
            ))];
        }

        let totals: Vec<f64> = weeks.iter().map(|week| series.week_total(*week)).collect();
        let deltas: Vec<f64> = totals.windows(2).map(|pair| pair[1] - pair[0]).collect();
        let count = deltas.len() as f64;
        let mean = deltas.iter().sum::<f64>() / count;
        let sd = (deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / count).sqrt();

        debug!(phase = phase_name, ?totals, mean, sd, "phase progression deltas");

        let smoothing = self.config.phase_smoothing_percent;
        let proposals: Vec<Proposal> = deltas
            .iter()
            .enumerate()
            .filter(|(_, delta)| (**delta - mean).abs() > sd)
            .map(|(i, delta)| {
                let week = weeks[i + 1];
                let percent = if *delta < mean { smoothing } else { -smoothing };
                let loads = series.week(week).unwrap_or_default();
                let changes = scale_days(week, loads, 0..loads.len(), percent);
                let direction = if percent > 0.0 { "Increase" } else { "Reduce" };
                self.finish(
                    Proposal {
                        kind: ProposalKind::SmoothProgression,
                        description: format!(
                            "{direction} week {week} of {phase_name} by {smoothing:.0}% to smooth an irregular {delta:+.0} change"
                        ),
                        target_week: Some(week),
                        percentage: Some(percent),
                        ..Proposal::message("")
                    },
                    changes,
                    series,
                )
            })
            .filter(Proposal::is_actionable)
            .collect();

        if proposals.is_empty() {
            return vec![Proposal::message(format!(
                "Load progression across \"{phase_name}\" is already smooth."
            ))];
        }
        proposals
    }
}
