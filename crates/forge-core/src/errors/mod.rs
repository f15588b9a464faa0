// ABOUTME: Unified error handling with error codes, context, and conversions
// ABOUTME: Defines AppError, ErrorCode, and AppResult shared by every Forge Assist crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! # Unified Error Handling System
//!
//! Every crate in the workspace reports failures through [`AppError`]. Domain
//! crates define their own `thiserror` enums and convert into `AppError` at the
//! component boundary so that callers only ever match on [`ErrorCode`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Input validation
    /// Generic invalid input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Numeric value outside its allowed range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange,

    // Analytics preconditions
    /// Series too short for the requested calculation
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData,
    /// Series length does not match a fixed-size window
    #[serde(rename = "INVALID_WINDOW_SIZE")]
    InvalidWindowSize,

    // Engine
    /// A change descriptor's target could not be located
    #[serde(rename = "UNRESOLVABLE_REFERENCE")]
    UnresolvableReference,
    /// Free-text command did not match the grammar
    #[serde(rename = "UNRECOGNIZED_COMMAND")]
    UnrecognizedCommand,
    /// Executor has no handler for the action name
    #[serde(rename = "UNKNOWN_ACTION")]
    UnknownAction,
    /// Mutation callback rejected a change
    #[serde(rename = "MUTATION_FAILED")]
    MutationFailed,

    // Configuration
    /// Required collaborator missing at construction
    #[serde(rename = "MISSING_DEPENDENCY")]
    MissingDependency,
    /// Configuration failed validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,

    // System
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
    /// Serialization or deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::InsufficientData => "Not enough data for this calculation",
            Self::InvalidWindowSize => "The data window has the wrong size",
            Self::UnresolvableReference => "The referenced schedule entry could not be found",
            Self::UnrecognizedCommand => "The command was not understood",
            Self::UnknownAction => "No handler exists for this action",
            Self::MutationFailed => "The schedule change could not be applied",
            Self::MissingDependency => "A required collaborator was not provided",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this error should be shown to the user rather than only logged
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::ValueOutOfRange
                | Self::UnrecognizedCommand
                | Self::UnknownAction
                | Self::MutationFailed
        )
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Action name when the error came from the engine
    pub action: Option<String>,
    /// Schedule entry identifier when applicable
    pub entry_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            action: None,
            entry_id: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Attach the action name to the error context
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.context.action = Some(action.into());
        self
    }

    /// Attach a schedule entry identifier to the error context
    #[must_use]
    pub fn with_entry_id(mut self, entry_id: impl Into<String>) -> Self {
        self.context.entry_id = Some(entry_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Series shorter than a calculation requires
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::new(
            ErrorCode::InsufficientData,
            format!("need at least {required} values, got {actual}"),
        )
        .with_details(serde_json::json!({ "required": required, "actual": actual }))
    }

    /// Series length differs from a fixed window
    #[must_use]
    pub fn invalid_window_size(expected: usize, actual: usize) -> Self {
        Self::new(
            ErrorCode::InvalidWindowSize,
            format!("expected exactly {expected} values, got {actual}"),
        )
        .with_details(serde_json::json!({ "expected": expected, "actual": actual }))
    }

    /// Change descriptor target could not be located
    #[must_use]
    pub fn unresolvable_reference(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        Self::new(
            ErrorCode::UnresolvableReference,
            format!("cannot resolve {reference}"),
        )
        .with_entry_id(reference)
    }

    /// Command text did not match any pattern
    #[must_use]
    pub fn unrecognized_command(text: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::UnrecognizedCommand,
            format!("Command not understood: \"{}\"", text.into()),
        )
    }

    /// Executor has no handler for the action
    #[must_use]
    pub fn unknown_action(action: impl Into<String>) -> Self {
        let action = action.into();
        Self::new(
            ErrorCode::UnknownAction,
            format!("Action \"{action}\" not yet implemented."),
        )
        .with_action(action)
    }

    /// Required collaborator missing
    #[must_use]
    pub fn missing_dependency(name: &str) -> Self {
        Self::new(
            ErrorCode::MissingDependency,
            format!("engine dependency `{name}` was not provided"),
        )
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Mutation callback failure
    #[must_use]
    pub fn mutation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MutationFailed, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}
