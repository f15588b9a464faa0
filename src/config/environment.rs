// ABOUTME: Environment configuration for the action engine and threshold monitor
// ABOUTME: Parses FORGE_* variables into validated engine settings with documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Environment-based engine settings

use forge_core::constants::{engine, notifications};
use forge_intelligence::{ConfigError, ProposalConfig, ThresholdConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Normal operation
    #[default]
    Info,
    /// Detailed diagnostics
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Settings the engine is constructed with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    /// Threshold monitor limits
    pub thresholds: ThresholdConfig,
    /// Proposal sizing
    pub proposals: ProposalConfig,
    /// Quiet period before analytics recompute after a mutation
    pub debounce_ms: u64,
    /// How long the impact preview notice stays up
    pub impact_notice_ms: u64,
    /// Default notice duration
    pub notice_ms: u64,
    /// Maximum proposals listed in a threshold alert
    pub max_displayed_proposals: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            proposals: ProposalConfig::default(),
            debounce_ms: engine::ANALYTICS_DEBOUNCE_MS,
            impact_notice_ms: notifications::IMPACT_PREVIEW_MS,
            notice_ms: notifications::DEFAULT_MS,
            max_displayed_proposals: engine::MAX_DISPLAYED_PROPOSALS,
        }
    }
}

impl EngineSettings {
    /// Load settings from the environment, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but malformed, or if the
    /// resulting settings fail validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let settings = Self {
            thresholds: ThresholdConfig::from_env()?,
            proposals: defaults.proposals,
            debounce_ms: env_u64("FORGE_DEBOUNCE_MS")?.unwrap_or(defaults.debounce_ms),
            impact_notice_ms: env_u64("FORGE_IMPACT_NOTICE_MS")?
                .unwrap_or(defaults.impact_notice_ms),
            notice_ms: defaults.notice_ms,
            max_displayed_proposals: env_u64("FORGE_MAX_DISPLAYED_PROPOSALS")?
                .map_or(defaults.max_displayed_proposals, |v| v as usize),
        };
        settings.validate()?;
        info!(
            debounce_ms = settings.debounce_ms,
            high_acwr = settings.thresholds.high_acwr,
            "engine settings loaded"
        );
        Ok(settings)
    }

    /// Validate every nested section
    ///
    /// # Errors
    ///
    /// Returns an error if any section is inconsistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.proposals.validate()?;
        if self.max_displayed_proposals == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_displayed_proposals must be at least 1",
            ));
        }
        Ok(())
    }

    /// Debounce window as a duration
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn env_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    env::var(key)
        .ok()
        .map(|raw| {
            raw.trim().parse::<u64>().map_err(|e| {
                warn!(key, value = %raw, "invalid integer setting");
                ConfigError::Parse(format!("{key}: {e}"))
            })
        })
        .transpose()
}
