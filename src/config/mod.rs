// ABOUTME: Configuration module for engine-wide settings
// ABOUTME: Threshold, proposal, timing, and logging settings loaded from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Configuration for the decision-support engine.
//!
//! - **Environment**: [`EngineSettings`] read from `FORGE_*` variables
//! - **Intelligence**: threshold and proposal tuning re-exported from
//!   `forge_intelligence`

/// Environment-driven engine settings
pub mod environment;

pub use environment::{EngineSettings, LogLevel};
pub use forge_intelligence::{ConfigError, ProposalConfig, ThresholdConfig};
