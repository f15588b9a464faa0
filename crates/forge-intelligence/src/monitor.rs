// ABOUTME: Threshold monitor comparing fresh analytics against configured risk bounds
// ABOUTME: Turns breaches into proposals and escalates repeated high-ACWR notices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! # Threshold Monitor
//!
//! Decision logic is stateless. The only state is a count of consecutive
//! evaluations with ACWR above the high bound, which raises the notification
//! severity and nothing else. The monitor never touches the schedule.

use crate::config::ThresholdConfig;
use crate::proposals::{Proposal, ProposalContext, ProposalGenerator, Trigger};
use crate::workload::AnalyticsSnapshot;
use forge_core::constants::{engine, notifications};
use forge_core::models::LoadSeries;
use forge_core::notifications::{Notifier, Severity};
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{info, warn};

/// One metric outside its configured bound
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breach {
    /// Trigger handed to the proposal generator
    #[serde(skip)]
    pub trigger: Trigger,
    /// Metric label
    pub metric: &'static str,
    /// Observed value
    pub value: f64,
    /// Bound that was crossed
    pub threshold: f64,
}

/// Result of one threshold check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorReport {
    /// Metrics outside their bounds
    pub breaches: Vec<Breach>,
    /// Concatenated proposals for every breach
    pub proposals: Vec<Proposal>,
    /// Notification severity for this check
    pub severity: Severity,
    /// Notification duration for this check
    pub duration_ms: u64,
    /// Consecutive high-ACWR evaluations including this one
    pub consecutive_high_acwr: u32,
}

impl MonitorReport {
    /// Whether any metric crossed its bound
    #[must_use]
    pub fn has_breaches(&self) -> bool {
        !self.breaches.is_empty()
    }
}

/// Compares analytics snapshots against thresholds
#[derive(Debug)]
pub struct ThresholdMonitor {
    thresholds: ThresholdConfig,
    generator: ProposalGenerator,
    max_displayed: usize,
    consecutive_high_acwr: AtomicU32,
}

impl ThresholdMonitor {
    /// Create a monitor
    #[must_use]
    pub const fn new(thresholds: ThresholdConfig, generator: ProposalGenerator) -> Self {
        Self {
            thresholds,
            generator,
            max_displayed: engine::MAX_DISPLAYED_PROPOSALS,
            consecutive_high_acwr: AtomicU32::new(0),
        }
    }

    /// Limit how many proposals one notification lists
    #[must_use]
    pub fn with_max_displayed(mut self, max_displayed: usize) -> Self {
        self.max_displayed = max_displayed;
        self
    }

    /// Thresholds in force
    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Current consecutive high-ACWR count
    #[must_use]
    pub fn consecutive_high_acwr(&self) -> u32 {
        self.consecutive_high_acwr.load(Ordering::Relaxed)
    }

    /// Forget the consecutive high-ACWR count
    pub fn reset(&self) {
        self.consecutive_high_acwr.store(0, Ordering::Relaxed);
    }

    /// Metrics in `snapshot` that cross a threshold
    #[must_use]
    pub fn breaches(&self, snapshot: &AnalyticsSnapshot) -> Vec<Breach> {
        let limits = &self.thresholds;
        let mut breaches = Vec::new();

        if let Some(ratio) = snapshot.acwr_ratio {
            if ratio > limits.high_acwr {
                breaches.push(Breach {
                    trigger: Trigger::HighAcwr,
                    metric: "ACWR",
                    value: ratio,
                    threshold: limits.high_acwr,
                });
            } else if ratio < limits.low_acwr {
                breaches.push(Breach {
                    trigger: Trigger::LowLoad,
                    metric: "ACWR",
                    value: ratio,
                    threshold: limits.low_acwr,
                });
            }
        }
        if let Some(monotony) = snapshot.monotony_value.filter(|m| *m > limits.high_monotony) {
            breaches.push(Breach {
                trigger: Trigger::HighMonotony,
                metric: "Monotony",
                value: monotony,
                threshold: limits.high_monotony,
            });
        }
        if let Some(strain) = snapshot.strain_value.filter(|s| *s > limits.high_strain) {
            breaches.push(Breach {
                trigger: Trigger::HighStrain,
                metric: "Strain",
                value: strain,
                threshold: limits.high_strain,
            });
        }
        breaches
    }

    /// Evaluate `snapshot` and generate proposals for each breach
    #[must_use]
    pub fn check(&self, snapshot: &AnalyticsSnapshot, series: &LoadSeries) -> MonitorReport {
        let breaches = self.breaches(snapshot);

        let high_acwr = breaches.iter().any(|b| b.trigger == Trigger::HighAcwr);
        let consecutive = if high_acwr {
            self.consecutive_high_acwr.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.consecutive_high_acwr.store(0, Ordering::Relaxed);
            0
        };

        let context = ProposalContext::new(series);
        let proposals: Vec<Proposal> = breaches
            .iter()
            .flat_map(|breach| self.generator.propose(&breach.trigger, &context))
            .collect();

        let (severity, duration_ms) = if consecutive >= engine::HIGH_ACWR_ESCALATION_COUNT {
            (Severity::Error, notifications::THRESHOLD_ESCALATED_MS)
        } else if breaches.is_empty() {
            (Severity::Info, notifications::DEFAULT_MS)
        } else {
            (Severity::Warning, notifications::THRESHOLD_WARNING_MS)
        };

        if !breaches.is_empty() {
            info!(
                breaches = breaches.len(),
                proposals = proposals.len(),
                consecutive_high_acwr = consecutive,
                "threshold check found breaches"
            );
        }

        MonitorReport {
            breaches,
            proposals,
            severity,
            duration_ms,
            consecutive_high_acwr: consecutive,
        }
    }

    /// Evaluate `snapshot` and forward any breach to `notifier`
    pub fn check_and_notify(
        &self,
        snapshot: &AnalyticsSnapshot,
        series: &LoadSeries,
        notifier: &dyn Notifier,
    ) -> MonitorReport {
        let report = self.check(snapshot, series);
        if report.has_breaches() {
            let message = self.compose_message(&report);
            if report.severity == Severity::Error {
                warn!(consecutive = report.consecutive_high_acwr, "repeated high ACWR");
            }
            notifier.notify(&message, report.severity, report.duration_ms);
        }
        report
    }

    fn compose_message(&self, report: &MonitorReport) -> String {
        let metrics = report
            .breaches
            .iter()
            .map(|b| {
                let relation = if b.value > b.threshold { '>' } else { '<' };
                format!("{} {:.2} {relation} {:.2}", b.metric, b.value, b.threshold)
            })
            .collect::<Vec<_>>()
            .join(", ");

        let shown: Vec<&str> = report
            .proposals
            .iter()
            .filter(|p| p.is_actionable())
            .take(self.max_displayed)
            .map(|p| p.description.as_str())
            .collect();

        if shown.is_empty() {
            format!("Load alert: {metrics}. No automatic adjustment is possible.")
        } else {
            format!("Load alert: {metrics}. Suggested: {}", shown.join("; "))
        }
    }
}
