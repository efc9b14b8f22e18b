//! Logged meal entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::window::WindowId;

/// Unique identifier for a logged entry.
pub type EntryId = String;

/// A single logged meal or snack. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEntry {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    /// Window this entry was logged against, if any.
    #[serde(default)]
    pub window_id: Option<WindowId>,
}

impl LoggedEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        calories: f64,
        protein_g: f64,
        carbs_g: f64,
        fat_g: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp,
            calories,
            protein_g,
            carbs_g,
            fat_g,
            window_id: None,
        }
    }
}

/// Running totals across a day's entries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConsumedTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl ConsumedTotals {
    /// Sum every entry, regardless of which window it was logged against.
    pub fn from_entries(entries: &[LoggedEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, e| {
            acc.calories += e.calories;
            acc.protein_g += e.protein_g;
            acc.carbs_g += e.carbs_g;
            acc.fat_g += e.fat_g;
            acc
        })
    }
}
