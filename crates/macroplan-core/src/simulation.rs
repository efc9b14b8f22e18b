//! Deterministic day replay for the redistribution engine.
//!
//! Steps simulated time through a scripted day of meal events and captures
//! a redistribution snapshot after each one. The engine is pure, so
//! replaying the same scenario always yields the same snapshots; the CLI
//! `simulate` command and regression tests both run on this.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::{LoggedEntry, Profile, Window};
use crate::redistribution::{redistribute, RedistributedWindow};

/// A scripted meal logged at a fixed time of the simulated day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEvent {
    pub at: DateTime<Utc>,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// A day to replay: the plan plus the meals that will be logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayScenario {
    pub name: String,
    pub profile: Profile,
    pub windows: Vec<Window>,
    /// Must be ordered by `at`; replay sorts defensively anyway.
    pub meals: Vec<MealEvent>,
}

/// The plan state right after one meal was logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub at: DateTime<Utc>,
    pub consumed_calories: f64,
    pub windows: Vec<RedistributedWindow>,
}

/// Replay a scenario, capturing one snapshot per meal event.
pub fn replay(scenario: &DayScenario) -> Vec<DaySnapshot> {
    let mut meals = scenario.meals.clone();
    meals.sort_by_key(|m| m.at);

    let mut entries: Vec<LoggedEntry> = Vec::new();
    let mut snapshots = Vec::with_capacity(meals.len());

    for meal in &meals {
        entries.push(LoggedEntry::new(
            meal.at,
            meal.calories,
            meal.protein_g,
            meal.carbs_g,
            meal.fat_g,
        ));

        let windows = redistribute(&scenario.windows, &entries, &scenario.profile, meal.at);
        snapshots.push(DaySnapshot {
            at: meal.at,
            consumed_calories: entries.iter().map(|e| e.calories).sum(),
            windows,
        });
    }

    snapshots
}
