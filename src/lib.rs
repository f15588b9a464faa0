// ABOUTME: Main library entry point for the Forge Assist decision-support engine
// ABOUTME: Workload analytics, remediation proposals, and simulate-and-confirm schedule actions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

#![deny(unsafe_code)]

//! # Forge Assist
//!
//! Decision support for a strength-training program editor. The engine
//! watches a program's daily load series, flags overreaching (ACWR, monotony,
//! strain), proposes remediations, and applies schedule edits only after the
//! user has seen their predicted impact and confirmed.
//!
//! ## Architecture
//!
//! - **`forge_core`**: shared models, constants, and the error taxonomy
//! - **`forge_intelligence`**: analytics, impact simulation, proposals, and
//!   the threshold monitor
//! - **Engine**: selection context, action catalog, lifecycle, and executor
//! - **Commands**: the closed free-text grammar
//! - **Analytics**: debounced recompute after mutations
//!
//! ## Example Usage
//!
//! ```rust
//! use forge_assist::commands::parse_command;
//! use forge_assist::engine::ActionRequest;
//!
//! let parsed = parse_command("Clear week 3").map(|p| p.request);
//! assert_eq!(parsed, Some(ActionRequest::ClearWeek { week: 3 }));
//! ```

/// Debounced analytics refresh
pub mod analytics;

/// External collaborator traits
pub mod collaborators;

/// Free-text command grammar
pub mod commands;

/// Engine settings from the environment
pub mod config;

/// Dependency and selection contexts
pub mod context;

/// Action engine, lifecycle, and executor
pub mod engine;

/// Engine error types
pub mod errors;

/// Structured logging setup
pub mod logging;

pub use forge_core::models;
pub use forge_intelligence as intelligence;

pub use collaborators::{
    ApplyError, ConfirmationRequest, ConfirmationSurface, ExerciseLookup, MutationApplier,
    Notifier, PreviewSurface, ScheduleAccessor, Severity,
};
pub use config::EngineSettings;
pub use context::{ActionContext, EngineDependencies, PhaseRef, Selection};
pub use engine::{ActionEngine, ActionOutcome, ActionRequest, ActionResult, LifecyclePhase};
pub use errors::{AppError, AppResult, EngineError};
