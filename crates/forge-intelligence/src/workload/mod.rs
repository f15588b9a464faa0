// ABOUTME: Rolling workload analytics: acute:chronic ratio and weekly monotony/strain
// ABOUTME: Pure, deterministic functions over a daily load series with no side effects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! # Workload Analytics
//!
//! - [`acwr`]: exponentially-weighted acute (7-day) load relative to chronic (28-day) load
//! - [`monotony`]: mean/sd of one week of daily loads and the resulting strain
//! - [`AnalyticsSnapshot`]: both metrics computed the way the editor refreshes them,
//!   degrading to "unavailable" instead of failing

mod acwr;
mod monotony;
mod snapshot;

pub use acwr::{acwr, AcwrFlag, AcwrResult};
pub use monotony::{monotony, MonotonyFlag, MonotonyResult};
pub use snapshot::AnalyticsSnapshot;

use forge_core::errors::AppError;
use thiserror::Error;

/// Analytics precondition failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// Series shorter than the calculation's minimum
    #[error("insufficient data: need at least {required} days, got {actual}")]
    InsufficientData {
        /// Minimum length
        required: usize,
        /// Supplied length
        actual: usize,
    },
    /// Series length differs from a fixed window
    #[error("invalid window size: expected exactly {expected} days, got {actual}")]
    InvalidWindowSize {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },
}

impl From<AnalyticsError> for AppError {
    fn from(error: AnalyticsError) -> Self {
        match error {
            AnalyticsError::InsufficientData { required, actual } => {
                Self::insufficient_data(required, actual)
            }
            AnalyticsError::InvalidWindowSize { expected, actual } => {
                Self::invalid_window_size(expected, actual)
            }
        }
    }
}

/// Round half away from zero to `decimals` places
#[must_use]
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
