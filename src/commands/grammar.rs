// ABOUTME: Ordered regex grammar mapping normalized command text to action requests
// ABOUTME: Patterns compile once on first use; a pattern that fails to compile is skipped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use crate::engine::{ActionRequest, Direction, Metric};
use forge_core::models::{parse_weekday, DaySlot, EquipmentProfile};
use forge_intelligence::exercise::SwapReason;
use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::{debug, warn};

const DAY: &str =
    "(mon|tue|wed|thu|fri|sat|sun|monday|tuesday|wednesday|thursday|friday|saturday|sunday)";

type Extractor = fn(&Captures<'_>) -> Option<ActionRequest>;

/// Grammar table in match order
const PATTERNS: &[(&str, &str, Extractor)] = &[
    (
        "suggest_swap",
        r"^suggest (?:alternative|alternatives|swap) for (.+)$",
        suggest_swap,
    ),
    (
        "missed_session",
        r"^(?:athlete )?missed {day} (?:wk|week) (\d+)$",
        missed_session,
    ),
    (
        "equipment_profile",
        r"^(?:use|switch to|convert to|limit to) (commercial[ _-]?gym|home[ _-]?basic|home[ _-]?advanced|travel|minimal) (?:equipment|profile|mode)$",
        equipment_profile,
    ),
    (
        "check_rotation",
        r"^(?:check|suggest) rotation for (.+)$",
        check_rotation,
    ),
    ("add_tempo", r"^add tempo (?:to|for) (.+)$", add_tempo),
    (
        "suggest_progression",
        r"^(?:suggest|apply) (?:progression|progressive overload) (?:for|to) (.+)$",
        suggest_progression,
    ),
    ("clear_week", r"^clear week (\d+)$", clear_week),
    ("clear_day", r"^clear {day} (?:wk|week) (\d+)$", clear_day),
    (
        "shift_week",
        r"^shift week (\d+) (forward|back) (\d+) days?$",
        shift_week,
    ),
    (
        "shift_day",
        r"^shift {day} (?:wk|week) (\d+) (forward|back) (\d+) days?$",
        shift_day,
    ),
    ("optimize", r"^optimize (acwr|monotony|strain)$", optimize),
    (
        "reduce_load",
        r"^reduce (?:load )?week (\d+) (?:load )?by (\d+(?:\.\d+)?)%$",
        reduce_load,
    ),
    (
        "convert_rest",
        r"^convert {day} (?:wk|week) (\d+) to (?:a )?rest day$",
        convert_rest,
    ),
    (
        "log_feedback",
        r"^(?:log|record) rpe (\d+(?:\.\d+)?) (?:for|on) (.+?) (?:with )?(\d+) reps$",
        log_feedback,
    ),
    ("check_deload", r"^check (?:for )?deload$", check_deload),
];

struct CommandPattern {
    name: &'static str,
    regex: Regex,
    extract: Extractor,
}

fn grammar() -> &'static [CommandPattern] {
    static GRAMMAR: OnceLock<Vec<CommandPattern>> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        PATTERNS
            .iter()
            .filter_map(|&(name, pattern, extract)| {
                Regex::new(&pattern.replace("{day}", DAY))
                    .inspect_err(|e| {
                        warn!(pattern = name, error = %e, "command pattern failed to compile");
                    })
                    .ok()
                    .map(|regex| CommandPattern {
                        name,
                        regex,
                        extract,
                    })
            })
            .collect()
    })
}

/// A recognized command
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    /// Name of the pattern that matched
    pub pattern: &'static str,
    /// Request to run
    pub request: ActionRequest,
}

/// Trim, lowercase, and collapse internal whitespace
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Match `text` against the grammar; first match wins
#[must_use]
pub fn parse_command(text: &str) -> Option<ParsedCommand> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }
    grammar().iter().find_map(|pattern| {
        let captures = pattern.regex.captures(&normalized)?;
        let request = (pattern.extract)(&captures)?;
        debug!(pattern = pattern.name, "command matched");
        Some(ParsedCommand {
            pattern: pattern.name,
            request,
        })
    })
}

/// Pattern names in match order
#[must_use]
pub fn pattern_names() -> Vec<&'static str> {
    grammar().iter().map(|p| p.name).collect()
}

fn text(captures: &Captures<'_>, group: usize) -> Option<String> {
    let value = captures.get(group)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn week(captures: &Captures<'_>, group: usize) -> Option<u32> {
    captures
        .get(group)?
        .as_str()
        .parse::<u32>()
        .ok()
        .filter(|w| *w >= 1)
}

fn slot(captures: &Captures<'_>, day_group: usize, week_group: usize) -> Option<DaySlot> {
    let day = parse_weekday(captures.get(day_group)?.as_str())?;
    Some(DaySlot::new(week(captures, week_group)?, day))
}

fn days(captures: &Captures<'_>, group: usize) -> Option<u32> {
    captures.get(group)?.as_str().parse().ok()
}

fn direction(captures: &Captures<'_>, group: usize) -> Option<Direction> {
    Direction::from_word(captures.get(group)?.as_str())
}

fn suggest_swap(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::SuggestSwap {
        exercise_name: text(c, 1)?,
        reason: SwapReason::Variation,
    })
}

fn missed_session(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::MissedSession {
        slot: slot(c, 1, 2)?,
    })
}

fn equipment_profile(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::SetEquipmentProfile {
        profile: EquipmentProfile::from_key(c.get(1)?.as_str())?,
    })
}

fn check_rotation(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::CheckRotation {
        exercise_name: text(c, 1)?,
    })
}

fn add_tempo(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::AddTempo {
        exercise_name: text(c, 1)?,
    })
}

fn suggest_progression(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::SuggestProgression {
        exercise_name: text(c, 1)?,
    })
}

fn clear_week(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::ClearWeek { week: week(c, 1)? })
}

fn clear_day(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::ClearDay {
        slot: slot(c, 1, 2)?,
    })
}

fn shift_week(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::ShiftWeek {
        week: week(c, 1)?,
        direction: direction(c, 2)?,
        days: days(c, 3)?,
    })
}

fn shift_day(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::ShiftDay {
        slot: slot(c, 1, 2)?,
        direction: direction(c, 3)?,
        days: days(c, 4)?,
    })
}

fn optimize(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::Optimize {
        metric: Metric::from_word(c.get(1)?.as_str())?,
    })
}

fn reduce_load(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::ReduceLoad {
        week: week(c, 1)?,
        percentage: c.get(2)?.as_str().parse().ok()?,
    })
}

fn convert_rest(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::ConvertToRestDay {
        slot: slot(c, 1, 2)?,
    })
}

fn log_feedback(c: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::RecordFeedback {
        exercise_name: text(c, 2)?,
        rpe: c.get(1)?.as_str().parse().ok()?,
        reps_completed: c.get(3)?.as_str().parse().ok()?,
    })
}

fn check_deload(_: &Captures<'_>) -> Option<ActionRequest> {
    Some(ActionRequest::CheckDeload)
}
