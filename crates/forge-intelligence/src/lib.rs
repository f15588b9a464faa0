// ABOUTME: Training-load intelligence: analytics, impact simulation, proposals, threshold monitoring
// ABOUTME: Stateless algorithms safe to call repeatedly without coordination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

#![deny(unsafe_code)]

//! # Forge Intelligence
//!
//! Data flows one way: a daily load series feeds [`workload`] analytics, the
//! [`simulator`] re-runs those analytics on hypothetical edits, the
//! [`proposals`] generator turns threshold breaches into scoped change bundles,
//! and the [`monitor`] decides when to ask for them.

/// RPE feedback history and deload detection
pub mod adaptive;

/// Threshold and proposal configuration
pub mod config;

/// Exercise swap, rotation, and progression helpers
pub mod exercise;

/// Threshold breach detection and notification escalation
pub mod monitor;

/// Decision-table proposal generation
pub mod proposals;

/// Impact simulation over modified load series
pub mod simulator;

/// ACWR and monotony/strain analytics
pub mod workload;

pub use adaptive::{
    detect_deload_need, DeloadAssessment, DeloadMetrics, DeloadStrategy, LoadAdjustment,
    PerformanceHistory,
};
pub use config::{ConfigError, ProposalConfig, ThresholdConfig};
pub use monitor::{Breach, MonitorReport, ThresholdMonitor};
pub use proposals::{Proposal, ProposalContext, ProposalGenerator, ProposalKind, Trigger};
pub use simulator::{ImpactSimulator, PredictedImpact};
pub use workload::{AnalyticsError, AnalyticsSnapshot};
