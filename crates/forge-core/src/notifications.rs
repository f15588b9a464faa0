// ABOUTME: User notification severity levels and the fire-and-forget notifier seam
// ABOUTME: Implemented by the host UI; the core only decides message, severity, and duration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral information
    Info,
    /// A completed action
    Success,
    /// Something needs attention
    Warning,
    /// Something failed or a risk escalated
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Fire-and-forget user notification surface
pub trait Notifier: Send + Sync {
    /// Show `message` for `duration_ms`
    fn notify(&self, message: &str, severity: Severity, duration_ms: u64);
}
