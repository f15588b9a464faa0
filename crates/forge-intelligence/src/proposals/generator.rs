// ABOUTME: Decision-table proposal generation for high ACWR, high monotony, low load, and high strain
// ABOUTME: Materializes percentage changes into per-day deltas and simulates each bundle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use super::{Proposal, ProposalKind, Trigger};
use crate::config::ProposalConfig;
use crate::simulator::ImpactSimulator;
use forge_core::models::{weekday_from_index, ChangeDescriptor, DaySlot, LoadSeries};
use tracing::{debug, info};

/// Inputs shared by every decision-table rule
#[derive(Debug, Clone, Copy)]
pub struct ProposalContext<'a> {
    /// Current program load series
    pub series: &'a LoadSeries,
    /// Week to act on; defaults to the week holding the most recent day
    pub target_week: Option<u32>,
}

impl<'a> ProposalContext<'a> {
    /// Context targeting the current week
    #[must_use]
    pub const fn new(series: &'a LoadSeries) -> Self {
        Self {
            series,
            target_week: None,
        }
    }

    /// Context targeting an explicit week
    #[must_use]
    pub const fn for_week(series: &'a LoadSeries, week: u32) -> Self {
        Self {
            series,
            target_week: Some(week),
        }
    }

    fn resolved_week(&self) -> Option<u32> {
        self.target_week.or_else(|| self.series.current_week())
    }
}

/// Generates remediation proposals from a fixed decision table
#[derive(Debug, Clone, Default)]
pub struct ProposalGenerator {
    pub(super) simulator: ImpactSimulator,
    pub(super) config: ProposalConfig,
}

impl ProposalGenerator {
    /// Create a generator that simulates with `simulator`
    #[must_use]
    pub const fn new(simulator: ImpactSimulator, config: ProposalConfig) -> Self {
        Self { simulator, config }
    }

    /// Proposals for `trigger` that are safe to show to the user.
    ///
    /// Proposals whose changes came out empty are dropped here.
    #[must_use]
    pub fn propose(&self, trigger: &Trigger, context: &ProposalContext<'_>) -> Vec<Proposal> {
        let generated = self.generate(trigger, context);
        let total = generated.len();
        let presentable: Vec<Proposal> = generated
            .into_iter()
            .filter(Proposal::is_presentable)
            .collect();
        if presentable.len() < total {
            debug!(
                %trigger,
                dropped = total - presentable.len(),
                "dropped proposals without applicable changes"
            );
        }
        presentable
    }

    /// Every proposal the decision table yields for `trigger`, including failed ones
    #[must_use]
    pub fn generate(&self, trigger: &Trigger, context: &ProposalContext<'_>) -> Vec<Proposal> {
        if let Trigger::Other(name) = trigger {
            info!(trigger = %name, "no decision-table rule for trigger");
            return vec![Proposal::message(format!(
                "No automatic adjustment is available for \"{name}\"."
            ))];
        }

        let Some(week) = context
            .resolved_week()
            .filter(|week| context.series.week(*week).is_some())
        else {
            return vec![Proposal::message(
                "Not enough schedule data to propose adjustments.",
            )];
        };

        let config = &self.config;
        match trigger {
            Trigger::HighAcwr => vec![
                self.scale_week(context.series, week, -config.week_reduction_percent),
                self.rest_day(context.series, week),
            ],
            Trigger::HighMonotony => vec![
                self.swap_extremes(context.series, week),
                self.scale_heaviest_day(context.series, week, -config.heavy_day_reduction_percent),
                self.scale_lightest_day(context.series, week, config.light_day_increase_percent),
            ],
            Trigger::LowLoad => vec![self.scale_week(
                context.series,
                week,
                config.low_load_increase_percent,
            )],
            Trigger::HighStrain => vec![
                self.scale_week(context.series, week, -config.strain_reduction_percent),
                self.rest_day(context.series, week),
            ],
            Trigger::Other(_) => Vec::new(),
        }
    }

    pub(super) fn scale_week(&self, series: &LoadSeries, week: u32, percent: f64) -> Proposal {
        let loads = series.week(week).unwrap_or_default();
        let changes = scale_days(week, loads, 0..loads.len(), percent);
        let (kind, verb) = if percent < 0.0 {
            (ProposalKind::ReduceLoad, "Reduce")
        } else {
            (ProposalKind::IncreaseLoad, "Increase")
        };
        self.finish(
            Proposal {
                kind,
                description: format!("{verb} total load in week {week} by {:.0}%", percent.abs()),
                target_week: Some(week),
                percentage: Some(percent),
                ..Proposal::message("")
            },
            changes,
            series,
        )
    }

    fn rest_day(&self, series: &LoadSeries, week: u32) -> Proposal {
        let loads = series.week(week).unwrap_or_default();
        let lightest = lightest_loaded_day(loads);
        let changes = lightest
            .map(|day| {
                vec![ChangeDescriptor::clear_day_load(
                    DaySlot::new(week, weekday_from_index(day)),
                    loads[day],
                )]
            })
            .unwrap_or_default();
        let description = lightest.map_or_else(
            || format!("No loaded day in week {week} can become a rest day"),
            |day| {
                format!(
                    "Insert a rest day on {} of week {week}",
                    weekday_from_index(day)
                )
            },
        );
        self.finish(
            Proposal {
                kind: ProposalKind::AddRestDay,
                description,
                target_week: Some(week),
                target_day: lightest.map(weekday_from_index),
                ..Proposal::message("")
            },
            changes,
            series,
        )
    }

    fn swap_extremes(&self, series: &LoadSeries, week: u32) -> Proposal {
        let loads = series.week(week).unwrap_or_default();
        let pair = heaviest_day(loads)
            .zip(lightest_loaded_day(loads))
            .filter(|(high, low)| high != low && loads[*high] > loads[*low]);

        let changes = pair
            .map(|(high, low)| {
                let high_slot = DaySlot::new(week, weekday_from_index(high));
                let low_slot = DaySlot::new(week, weekday_from_index(low));
                vec![
                    ChangeDescriptor::modify_day_load(high_slot, loads[high], loads[low]),
                    ChangeDescriptor::modify_day_load(low_slot, loads[low], loads[high]),
                ]
            })
            .unwrap_or_default();
        let description = pair.map_or_else(
            || format!("Week {week} has no distinct heavy and light days to swap"),
            |(high, low)| {
                format!(
                    "Swap {} ({:.0}) with {} ({:.0}) in week {week} to vary daily load",
                    weekday_from_index(high),
                    loads[high],
                    weekday_from_index(low),
                    loads[low]
                )
            },
        );
        self.finish(
            Proposal {
                kind: ProposalKind::SwapDays,
                description,
                target_week: Some(week),
                target_day: pair.map(|(high, _)| weekday_from_index(high)),
                secondary_day: pair.map(|(_, low)| weekday_from_index(low)),
                ..Proposal::message("")
            },
            changes,
            series,
        )
    }

    fn scale_heaviest_day(&self, series: &LoadSeries, week: u32, percent: f64) -> Proposal {
        let loads = series.week(week).unwrap_or_default();
        let day = heaviest_day(loads);
        self.scale_single_day(series, week, day, percent, ProposalKind::ReduceSpecificDay)
    }

    fn scale_lightest_day(&self, series: &LoadSeries, week: u32, percent: f64) -> Proposal {
        let loads = series.week(week).unwrap_or_default();
        let day = lightest_loaded_day(loads);
        self.scale_single_day(series, week, day, percent, ProposalKind::IncreaseLowDay)
    }

    fn scale_single_day(
        &self,
        series: &LoadSeries,
        week: u32,
        day: Option<usize>,
        percent: f64,
        kind: ProposalKind,
    ) -> Proposal {
        let loads = series.week(week).unwrap_or_default();
        let changes = day
            .map(|day| scale_days(week, loads, day..=day, percent))
            .unwrap_or_default();
        let verb = if percent < 0.0 { "Reduce" } else { "Increase" };
        let description = day.map_or_else(
            || format!("No suitable day in week {week} to adjust"),
            |day| {
                format!(
                    "{verb} {} of week {week} by {:.0}%",
                    weekday_from_index(day),
                    percent.abs()
                )
            },
        );
        self.finish(
            Proposal {
                kind,
                description,
                target_week: Some(week),
                target_day: day.map(weekday_from_index),
                percentage: Some(percent),
                ..Proposal::message("")
            },
            changes,
            series,
        )
    }

    /// Attach changes, simulate them, and set `success`
    pub(super) fn finish(
        &self,
        proposal: Proposal,
        changes: Vec<ChangeDescriptor>,
        series: &LoadSeries,
    ) -> Proposal {
        let impact = self.simulator.simulate(&changes, series);
        Proposal {
            success: !changes.is_empty(),
            changes,
            impact,
            ..proposal
        }
    }
}

/// Per-day deltas for scaling the given day positions of one week by `percent`.
///
/// Days whose rounded load would not change are omitted.
pub(super) fn scale_days(
    week: u32,
    loads: &[f64],
    days: impl IntoIterator<Item = usize>,
    percent: f64,
) -> Vec<ChangeDescriptor> {
    days.into_iter()
        .filter_map(|day| {
            let current = *loads.get(day)?;
            let proposed = (current * (1.0 + percent / 100.0)).round().max(0.0);
            ((proposed - current).abs() > f64::EPSILON).then(|| {
                ChangeDescriptor::modify_day_load(
                    DaySlot::new(week, weekday_from_index(day)),
                    current,
                    proposed,
                )
            })
        })
        .collect()
}

/// First day holding the maximum load
fn heaviest_day(loads: &[f64]) -> Option<usize> {
    loads
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (day, &load)| match best {
            Some((_, top)) if load <= top => best,
            _ => Some((day, load)),
        })
        .map(|(day, _)| day)
}

/// First day holding the minimum non-zero load
fn lightest_loaded_day(loads: &[f64]) -> Option<usize> {
    loads
        .iter()
        .enumerate()
        .filter(|(_, load)| **load > 0.0)
        .fold(None, |best: Option<(usize, f64)>, (day, &load)| match best {
            Some((_, low)) if load >= low => best,
            _ => Some((day, load)),
        })
        .map(|(day, _)| day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use forge_core::models::Change;

    fn week_series(loads: [f64; 7]) -> LoadSeries {
        LoadSeries::new(loads.to_vec())
    }

    #[test]
    fn test_high_acwr_on_zero_week_yields_nothing_actionable() {
        let series = week_series([0.0; 7]);
        let generator = ProposalGenerator::default();
        let context = ProposalContext::new(&series);

        let generated = generator.generate(&Trigger::HighAcwr, &context);
        assert_eq!(generated.len(), 2);
        assert!(generated.iter().all(|p| !p.success && p.changes.is_empty()));
        assert!(generator.propose(&Trigger::HighAcwr, &context).is_empty());
    }

    #[test]
    fn test_high_acwr_reduces_week_and_rests_lightest_day() {
        let series = week_series([400.0, 300.0, 0.0, 200.0, 350.0, 200.0, 0.0]);
        let proposals = ProposalGenerator::default()
            .propose(&Trigger::HighAcwr, &ProposalContext::new(&series));
        assert_eq!(proposals.len(), 2);

        let reduce = &proposals[0];
        assert_eq!(reduce.kind, ProposalKind::ReduceLoad);
        assert_eq!(reduce.changes.len(), 5);
        assert_eq!(reduce.percentage, Some(-15.0));
        assert!((reduce.impact.estimated_load_change + 217.0).abs() < 1e-9);

        let rest = &proposals[1];
        assert_eq!(rest.kind, ProposalKind::AddRestDay);
        assert_eq!(rest.target_day, Some(Weekday::Thu));
        assert!(matches!(rest.changes[0].change, Change::Remove { load } if (load - 200.0).abs() < 1e-9));
    }

    #[test]
    fn test_high_monotony_swap_breaks_ties_on_first_day() {
        let series = week_series([300.0, 300.0, 100.0, 100.0, 300.0, 0.0, 0.0]);
        let proposals = ProposalGenerator::default()
            .propose(&Trigger::HighMonotony, &ProposalContext::new(&series));
        assert_eq!(proposals.len(), 3);

        let swap = &proposals[0];
        assert_eq!(swap.kind, ProposalKind::SwapDays);
        assert_eq!(swap.target_day, Some(Weekday::Mon));
        assert_eq!(swap.secondary_day, Some(Weekday::Wed));
        assert!(swap.impact.estimated_load_change.abs() < 1e-9);

        assert_eq!(proposals[1].kind, ProposalKind::ReduceSpecificDay);
        assert_eq!(proposals[1].target_day, Some(Weekday::Mon));
        assert_eq!(proposals[2].kind, ProposalKind::IncreaseLowDay);
        assert_eq!(proposals[2].target_day, Some(Weekday::Wed));
    }

    #[test]
    fn test_uniform_week_cannot_swap() {
        let series = week_series([250.0; 7]);
        let generated = ProposalGenerator::default()
            .generate(&Trigger::HighMonotony, &ProposalContext::new(&series));
        assert!(!generated[0].success);
        assert!(generated[1].success);
    }

    #[test]
    fn test_low_load_targets_requested_week() {
        let mut loads = vec![100.0; 7];
        loads.extend([200.0; 7]);
        let series = LoadSeries::new(loads);
        let proposals = ProposalGenerator::default()
            .propose(&Trigger::LowLoad, &ProposalContext::for_week(&series, 1));
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].target_week, Some(1));
        assert!((proposals[0].impact.estimated_load_change - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_trigger_is_informational() {
        let series = week_series([100.0; 7]);
        let proposals = ProposalGenerator::default().propose(
            &Trigger::from_name("sleepDebt"),
            &ProposalContext::new(&series),
        );
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].kind, ProposalKind::Message);
        assert!(!proposals[0].is_actionable());
    }

    #[test]
    fn test_trigger_names() {
        assert_eq!(Trigger::from_name("highACWR"), Trigger::HighAcwr);
        assert_eq!(Trigger::from_name("low-load"), Trigger::LowLoad);
        assert_eq!(Trigger::HighMonotony.to_string(), "highMonotony");
    }

    #[test]
    fn test_scale_days_omits_zero_deltas() {
        let changes = scale_days(1, &[0.0, 3.0, 100.0], 0..3, -10.0);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].slot, Some(DaySlot::new(1, Weekday::Wed)));
    }
}
