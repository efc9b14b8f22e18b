//! User profile: daily targets and the primary goal.

use serde::{Deserialize, Serialize};

/// The goal that drives redistribution bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    WeightLoss,
    MuscleBuild,
    ImproveEnergy,
    /// Default goal when the user picked nothing specific.
    #[default]
    Maintain,
}

/// Daily targets and goal for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub daily_calorie_target: f64,
    pub daily_protein_target: f64,
    pub daily_carb_target: f64,
    pub daily_fat_target: f64,
    #[serde(default)]
    pub primary_goal: PrimaryGoal,
}

impl Profile {
    pub fn new(
        daily_calorie_target: f64,
        daily_protein_target: f64,
        daily_carb_target: f64,
        daily_fat_target: f64,
        primary_goal: PrimaryGoal,
    ) -> Self {
        Self {
            daily_calorie_target,
            daily_protein_target,
            daily_carb_target,
            daily_fat_target,
            primary_goal,
        }
    }
}
