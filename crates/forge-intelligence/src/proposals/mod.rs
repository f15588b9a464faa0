// ABOUTME: Rule-based remediation proposals for workload threshold breaches
// ABOUTME: Fixed decision table producing scoped change bundles with their simulated impact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! # Proposal Generator
//!
//! Proposals are generated per trigger from a fixed decision table. Every
//! percentage change is first materialized into per-day deltas, then simulated.
//! A proposal whose deltas are all zero is marked `success = false` and never
//! reaches the caller through [`ProposalGenerator::propose`].

mod generator;
mod phase;

pub use generator::{ProposalContext, ProposalGenerator};

use crate::simulator::PredictedImpact;
use chrono::Weekday;
use forge_core::models::ChangeDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition that asks for proposals
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// ACWR above the configured high bound
    HighAcwr,
    /// Weekly monotony above the configured bound
    HighMonotony,
    /// ACWR below the configured low bound
    LowLoad,
    /// Weekly strain above the configured bound
    HighStrain,
    /// Anything else; answered with an informational proposal
    Other(String),
}

impl Trigger {
    /// Parse a trigger name such as `highACWR` or `low-load`
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "highacwr" => Self::HighAcwr,
            "highmonotony" => Self::HighMonotony,
            "lowload" | "lowacwr" => Self::LowLoad,
            "highstrain" => Self::HighStrain,
            _ => Self::Other(name.to_owned()),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighAcwr => f.write_str("highACWR"),
            Self::HighMonotony => f.write_str("highMonotony"),
            Self::LowLoad => f.write_str("lowLoad"),
            Self::HighStrain => f.write_str("highStrain"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// What a proposal does when adopted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProposalKind {
    /// Scale a whole week down
    ReduceLoad,
    /// Scale one day down
    ReduceSpecificDay,
    /// Scale a whole week up
    IncreaseLoad,
    /// Scale one light day up
    IncreaseLowDay,
    /// Clear one day
    AddRestDay,
    /// Exchange the loads of two days
    SwapDays,
    /// Nudge one week of a phase towards the mean progression
    SmoothProgression,
    /// Informational only, nothing to apply
    Message,
}

/// One adoptable suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Proposal type
    #[serde(rename = "type")]
    pub kind: ProposalKind,
    /// Human-readable summary
    pub description: String,
    /// Week the changes apply to
    pub target_week: Option<u32>,
    /// Day the changes apply to, for single-day proposals
    pub target_day: Option<Weekday>,
    /// Second day of a swap
    pub secondary_day: Option<Weekday>,
    /// Signed percentage change, when percentage based
    pub percentage: Option<f64>,
    /// Day-level change descriptors
    pub changes: Vec<ChangeDescriptor>,
    /// Simulated effect of `changes`
    pub impact: PredictedImpact,
    /// False when nothing could be changed
    pub success: bool,
}

impl Proposal {
    /// Informational proposal carrying no changes
    #[must_use]
    pub fn message(description: impl Into<String>) -> Self {
        Self {
            kind: ProposalKind::Message,
            description: description.into(),
            target_week: None,
            target_day: None,
            secondary_day: None,
            percentage: None,
            changes: Vec::new(),
            impact: PredictedImpact::neutral(),
            success: true,
        }
    }

    /// Whether adopting this proposal would change the schedule
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.success && self.kind != ProposalKind::Message && !self.changes.is_empty()
    }

    /// Whether the proposal may be shown to the user
    #[must_use]
    pub fn is_presentable(&self) -> bool {
        self.kind == ProposalKind::Message || self.is_actionable()
    }
}
