// ABOUTME: Threshold and proposal configuration for the decision-support algorithms
// ABOUTME: Defaults, validation, and environment overrides read once at initialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Intelligence configuration.
//!
//! Values are read once when the engine is built and never written afterwards.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::env;

/// Risk thresholds that trigger proposals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    /// ACWR above this triggers load-reduction proposals
    #[serde(rename = "highACWR")]
    pub high_acwr: f64,
    /// ACWR below this triggers load-increase proposals
    #[serde(rename = "lowACWR")]
    pub low_acwr: f64,
    /// Weekly monotony above this triggers variation proposals
    pub high_monotony: f64,
    /// Weekly strain above this triggers reduction proposals
    pub high_strain: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            high_acwr: 1.5,
            low_acwr: 0.8,
            high_monotony: 2.0,
            high_strain: 5500.0,
        }
    }
}

impl ThresholdConfig {
    /// Load thresholds from `FORGE_*` environment variables, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but unparseable, or the result fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            high_acwr: env_f64("FORGE_HIGH_ACWR", defaults.high_acwr)?,
            low_acwr: env_f64("FORGE_LOW_ACWR", defaults.low_acwr)?,
            high_monotony: env_f64("FORGE_HIGH_MONOTONY", defaults.high_monotony)?,
            high_strain: env_f64("FORGE_HIGH_STRAIN", defaults.high_strain)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate threshold values
    ///
    /// # Errors
    ///
    /// Returns an error if any bound is non-positive or non-finite, or low ACWR is not below high ACWR
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (value, name) in [
            (self.high_acwr, "highACWR must be a positive number"),
            (self.low_acwr, "lowACWR must be a positive number"),
            (self.high_monotony, "highMonotony must be a positive number"),
            (self.high_strain, "highStrain must be a positive number"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValueOutOfRange(name));
            }
        }
        if self.low_acwr >= self.high_acwr {
            return Err(ConfigError::InvalidRange(
                "lowACWR must be below highACWR",
            ));
        }
        Ok(())
    }
}

/// Percentages used by the proposal decision table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProposalConfig {
    /// Whole-week reduction on high ACWR
    pub week_reduction_percent: f64,
    /// Heaviest-day reduction on high monotony
    pub heavy_day_reduction_percent: f64,
    /// Lightest-day increase on high monotony
    pub light_day_increase_percent: f64,
    /// Whole-week increase on low load
    pub low_load_increase_percent: f64,
    /// Week adjustment when smoothing a phase progression
    pub phase_smoothing_percent: f64,
    /// Whole-week reduction on high strain
    pub strain_reduction_percent: f64,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            week_reduction_percent: 15.0,
            heavy_day_reduction_percent: 20.0,
            light_day_increase_percent: 15.0,
            low_load_increase_percent: 10.0,
            phase_smoothing_percent: 5.0,
            strain_reduction_percent: 30.0,
        }
    }
}

impl ProposalConfig {
    /// Validate that every percentage is within (0, 100)
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range percentage
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (value, name) in [
            (self.week_reduction_percent, "week_reduction_percent must be in (0, 100)"),
            (self.heavy_day_reduction_percent, "heavy_day_reduction_percent must be in (0, 100)"),
            (self.light_day_increase_percent, "light_day_increase_percent must be in (0, 100)"),
            (self.low_load_increase_percent, "low_load_increase_percent must be in (0, 100)"),
            (self.phase_smoothing_percent, "phase_smoothing_percent must be in (0, 100)"),
            (self.strain_reduction_percent, "strain_reduction_percent must be in (0, 100)"),
        ] {
            if value.is_nan() || value <= 0.0 || value >= 100.0 {
                return Err(ConfigError::ValueOutOfRange(name));
            }
        }
        Ok(())
    }
}

/// Read an `f64` environment variable, using `default` when unset
fn env_f64(name: &str, default: f64) -> Result<f64, ConfigError> {
    env::var(name).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::Parse(format!("{name}={raw}: {e}")))
    })
}
