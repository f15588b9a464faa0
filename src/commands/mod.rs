// ABOUTME: Free-text command parsing into engine action requests
// ABOUTME: A closed, ordered grammar where the first matching pattern wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Command parsing
//!
//! The grammar is deliberately closed. Input that matches none of the
//! patterns is reported back to the user rather than guessed at.

mod grammar;

pub use grammar::{normalize, parse_command, pattern_names, ParsedCommand};
