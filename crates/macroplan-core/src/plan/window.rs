//! Eating windows and window state classification.
//!
//! A window is a time-bounded eating opportunity carrying calorie and macro
//! targets. Windows for a day are non-overlapping and ordered by start time;
//! they are produced by the external plan generator and only the
//! redistribution engine writes to their adjusted fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a window.
pub type WindowId = String;

/// What a window is optimized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPurpose {
    SustainedEnergy,
    FocusBoost,
    Recovery,
    Preworkout,
    Postworkout,
    MetabolicBoost,
    SleepOptimization,
}

/// Gram targets for the three macronutrients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacroTargets {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl MacroTargets {
    pub fn new(protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    /// Calories implied by the macro grams (4/4/9 kcal per gram).
    pub fn implied_calories(&self) -> f64 {
        self.protein_g * 4.0 + self.carbs_g * 4.0 + self.fat_g * 9.0
    }
}

/// A time-bounded eating opportunity with calorie/macro targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    /// Unique identifier for this window.
    pub id: WindowId,
    /// Start of the window.
    pub start_time: DateTime<Utc>,
    /// End of the window.
    pub end_time: DateTime<Utc>,
    /// What this window is optimized for.
    pub purpose: WindowPurpose,
    /// Original calorie target from the plan generator.
    pub target_calories: f64,
    /// Original macro targets from the plan generator.
    pub target_macros: MacroTargets,
}

impl Window {
    /// Create a window with a fresh id.
    pub fn new(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        purpose: WindowPurpose,
        target_calories: f64,
        target_macros: MacroTargets,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            start_time,
            end_time,
            purpose,
            target_calories,
            target_macros,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Minutes from `now` until this window closes. Negative once past.
    pub fn minutes_left(&self, now: DateTime<Utc>) -> i64 {
        (self.end_time - now).num_minutes()
    }
}

/// Where a window sits relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    Past,
    Active,
    Upcoming,
}

/// Classify a window against the current time.
///
/// Active iff `start <= now <= end` (both bounds inclusive). Pure and total
/// over any window/time pair, including zero-duration windows.
pub fn classify(window: &Window, now: DateTime<Utc>) -> WindowState {
    if now > window.end_time {
        WindowState::Past
    } else if now < window.start_time {
        WindowState::Upcoming
    } else {
        WindowState::Active
    }
}
