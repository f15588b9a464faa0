// ABOUTME: Per-exercise RPE feedback history and the load adjustment each session implies
// ABOUTME: Keeps the most recent sessions and steers prescribed load toward the target RPE
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

use forge_core::constants::adaptive::{
    DEFAULT_TARGET_RPE, FEEDBACK_HISTORY_SESSIONS, LARGE_ADJUSTMENT, MAINTENANCE_ADJUSTMENT,
    MODERATE_ADJUSTMENT, RPE_FAR_BAND, RPE_ON_TARGET_BAND,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Where a session's RPE landed relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdjustmentBand {
    /// More than 1.5 below target
    SignificantIncrease,
    /// Between 0.5 and 1.5 below target
    ModerateIncrease,
    /// Within 0.5 of target
    OnTarget,
    /// Between 0.5 and 1.5 above target
    ModerateDecrease,
    /// More than 1.5 above target
    SignificantDecrease,
}

impl AdjustmentBand {
    /// Classify one session's RPE against `target`
    #[must_use]
    pub fn classify(rpe: f64, target: f64) -> Self {
        if rpe < target - RPE_FAR_BAND {
            Self::SignificantIncrease
        } else if rpe < target - RPE_ON_TARGET_BAND {
            Self::ModerateIncrease
        } else if rpe > target + RPE_FAR_BAND {
            Self::SignificantDecrease
        } else if rpe > target + RPE_ON_TARGET_BAND {
            Self::ModerateDecrease
        } else {
            Self::OnTarget
        }
    }

    /// Signed load change as a fraction of the current load
    #[must_use]
    pub const fn load_fraction(self) -> f64 {
        match self {
            Self::SignificantIncrease => LARGE_ADJUSTMENT,
            Self::ModerateIncrease => MODERATE_ADJUSTMENT,
            Self::OnTarget => MAINTENANCE_ADJUSTMENT,
            Self::ModerateDecrease => -MODERATE_ADJUSTMENT,
            Self::SignificantDecrease => -LARGE_ADJUSTMENT,
        }
    }

    /// Coaching rationale
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::SignificantIncrease => "RPE too low - significant increase needed",
            Self::ModerateIncrease => "RPE below target - moderate increase recommended",
            Self::OnTarget => "RPE on target - minimal progression",
            Self::ModerateDecrease => "RPE above target - moderate decrease recommended",
            Self::SignificantDecrease => "RPE too high - significant decrease needed",
        }
    }
}

/// Load recommendation after one session of feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadAdjustment {
    /// Signed fraction of the current load, e.g. `0.05` for +5%
    pub load_adjustment: f64,
    /// Band the session fell into
    pub band: AdjustmentBand,
    /// Coaching rationale
    pub reason: String,
    /// RPE the adjustment steers toward
    pub target_rpe: f64,
    /// Mean RPE over the retained sessions
    pub avg_recent_rpe: f64,
}

impl LoadAdjustment {
    /// Signed adjustment in percent
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.load_adjustment * 100.0
    }
}

impl fmt::Display for LoadAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.load_adjustment > 0.0 {
            "Increase"
        } else {
            "Decrease"
        };
        write!(
            f,
            "{verb} load by {:.1}% ({})",
            self.percent().abs(),
            self.reason
        )
    }
}

/// Recent feedback for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseHistory {
    recent_rpes: VecDeque<f64>,
    recent_completions: VecDeque<u32>,
    /// RPE adjustments steer toward
    pub target_rpe: f64,
    /// Fraction returned by the last recorded session
    pub last_adjustment: f64,
}

impl Default for ExerciseHistory {
    fn default() -> Self {
        Self::with_target(DEFAULT_TARGET_RPE)
    }
}

impl ExerciseHistory {
    /// Empty history steering toward `target_rpe`
    #[must_use]
    pub const fn with_target(target_rpe: f64) -> Self {
        Self {
            recent_rpes: VecDeque::new(),
            recent_completions: VecDeque::new(),
            target_rpe,
            last_adjustment: 0.0,
        }
    }

    /// Record a session and return the load adjustment it calls for.
    ///
    /// The band is chosen from this session's RPE, not the running average.
    pub fn record(&mut self, rpe: f64, reps_completed: u32) -> LoadAdjustment {
        self.recent_rpes.push_back(rpe);
        self.recent_completions.push_back(reps_completed);
        while self.recent_rpes.len() > FEEDBACK_HISTORY_SESSIONS {
            self.recent_rpes.pop_front();
            self.recent_completions.pop_front();
        }

        let band = AdjustmentBand::classify(rpe, self.target_rpe);
        self.last_adjustment = band.load_fraction();
        LoadAdjustment {
            load_adjustment: self.last_adjustment,
            band,
            reason: band.reason().to_owned(),
            target_rpe: self.target_rpe,
            avg_recent_rpe: self.average_rpe(),
        }
    }

    /// Sessions retained
    #[must_use]
    pub fn sessions(&self) -> usize {
        self.recent_rpes.len()
    }

    /// Retained RPEs, oldest first
    #[must_use]
    pub fn rpes(&self) -> Vec<f64> {
        self.recent_rpes.iter().copied().collect()
    }

    /// Mean retained RPE, 0 when empty
    #[must_use]
    pub fn average_rpe(&self) -> f64 {
        if self.recent_rpes.is_empty() {
            return 0.0;
        }
        self.recent_rpes.iter().sum::<f64>() / self.recent_rpes.len() as f64
    }

    /// Average RPE change per session across the retained window
    #[must_use]
    pub fn rpe_increase_rate(&self) -> f64 {
        match (self.recent_rpes.front(), self.recent_rpes.back()) {
            (Some(first), Some(last)) if self.recent_rpes.len() > 1 => {
                (last - first) / (self.recent_rpes.len() - 1) as f64
            }
            _ => 0.0,
        }
    }

    /// Trailing sessions in a row that completed fewer reps than the one before
    #[must_use]
    pub fn decline_streak(&self) -> u32 {
        let completions: Vec<u32> = self.recent_completions.iter().copied().collect();
        completions
            .windows(2)
            .rev()
            .take_while(|pair| pair[1] < pair[0])
            .count() as u32
    }
}

/// Fatigue indicators aggregated over every tracked exercise
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueSignals {
    /// Longest current run of declining sessions
    pub performance_decline_duration: u32,
    /// Steepest per-session RPE rise
    pub rpe_increase_rate: f64,
}

/// Feedback history keyed by exercise id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceHistory {
    exercises: HashMap<String, ExerciseHistory>,
}

impl PerformanceHistory {
    /// Record a session for `exercise_id`
    pub fn record(&mut self, exercise_id: &str, rpe: f64, reps_completed: u32) -> LoadAdjustment {
        self.exercises
            .entry(exercise_id.to_owned())
            .or_default()
            .record(rpe, reps_completed)
    }

    /// History for one exercise
    #[must_use]
    pub fn exercise(&self, exercise_id: &str) -> Option<&ExerciseHistory> {
        self.exercises.get(exercise_id)
    }

    /// Number of exercises with feedback
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Whether no feedback was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Forget all feedback
    pub fn clear(&mut self) {
        self.exercises.clear();
    }

    /// Worst-case fatigue indicators across exercises
    #[must_use]
    pub fn fatigue(&self) -> FatigueSignals {
        self.exercises
            .values()
            .fold(FatigueSignals::default(), |signals, history| FatigueSignals {
                performance_decline_duration: signals
                    .performance_decline_duration
                    .max(history.decline_streak()),
                rpe_increase_rate: signals.rpe_increase_rate.max(history.rpe_increase_rate()),
            })
    }
}
