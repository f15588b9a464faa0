// ABOUTME: Engine-level error types layered on the shared AppError taxonomy
// ABOUTME: Covers construction, command parsing, action dispatch, and reference resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! # Engine Errors
//!
//! Only the engine's top-level entry points surface errors; everything below
//! them logs and continues where a partial result is still useful.

pub use forge_core::errors::{AppError, AppResult, ErrorCode, ErrorContext};

use forge_intelligence::{AnalyticsError, ConfigError};
use thiserror::Error;

/// Failures raised by the action engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required collaborator was not supplied to the builder
    #[error("engine dependency `{0}` was not provided")]
    MissingDependency(&'static str),

    /// Free text did not match the command grammar
    #[error("Command not understood: \"{0}\"")]
    UnrecognizedCommand(String),

    /// The executor has no handler for an action name
    #[error("Action \"{0}\" not yet implemented.")]
    UnknownAction(String),

    /// A change descriptor's target could not be located
    #[error("cannot resolve {0}")]
    UnresolvableReference(String),

    /// Settings failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Analytics preconditions unmet
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

impl From<EngineError> for AppError {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::MissingDependency(name) => Self::missing_dependency(name),
            EngineError::UnrecognizedCommand(text) => Self::unrecognized_command(text),
            EngineError::UnknownAction(action) => Self::unknown_action(action),
            EngineError::UnresolvableReference(reference) => {
                Self::unresolvable_reference(reference)
            }
            EngineError::Config(e) => e.into(),
            EngineError::Analytics(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_map_to_codes() {
        let unknown: AppError = EngineError::UnknownAction("teleport".into()).into();
        assert_eq!(unknown.code, ErrorCode::UnknownAction);
        assert_eq!(unknown.context.action.as_deref(), Some("teleport"));

        let stale: AppError = EngineError::UnresolvableReference("w2d3".into()).into();
        assert_eq!(stale.code, ErrorCode::UnresolvableReference);
        assert_eq!(stale.context.entry_id.as_deref(), Some("w2d3"));
        assert!(!stale.code.is_user_facing());

        let missing: AppError = EngineError::MissingDependency("notifier").into();
        assert_eq!(missing.code, ErrorCode::MissingDependency);

        let short: AppError = EngineError::from(AnalyticsError::InsufficientData {
            required: 28,
            actual: 3,
        })
        .into();
        assert_eq!(short.code, ErrorCode::InsufficientData);
    }
}
