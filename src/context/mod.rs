// ABOUTME: Dependency injection and selection contexts for the action engine
// ABOUTME: Collaborator bundle with a fail-fast builder plus the current calendar selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Engine contexts
//!
//! - `EngineDependencies`: collaborators injected at construction
//! - `ActionContext`: what the user currently has selected

pub mod dependencies;
pub mod selection;

pub use dependencies::{EngineDependencies, EngineDependenciesBuilder};
pub use selection::{ActionContext, PhaseRef, Selection};
