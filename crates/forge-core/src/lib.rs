// ABOUTME: Core types and constants for the Forge Assist program editor
// ABOUTME: Foundation crate with error handling, schedule models, and analytics constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

#![deny(unsafe_code)]

//! # Forge Core
//!
//! Foundation crate providing shared types and constants for the Forge Assist
//! decision-support core. It changes rarely, which keeps incremental builds of
//! the intelligence and engine crates cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Analytics windows, smoothing factors, and flag cut-offs
//! - **models**: Load series, schedule entries, change descriptors, exercise metadata

/// Unified error handling system with standard error codes
pub mod errors;

/// Analytics and notification constants organized by domain
pub mod constants;

/// Core data models (`LoadSeries`, `ChangeDescriptor`, `ScheduleEntry`, ...)
pub mod models;

/// Notification severity and the notifier seam
pub mod notifications;
