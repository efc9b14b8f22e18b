//! Plan files: a whole day's data in one JSON document.
//!
//! The CLI stands in for the app's real data layer, so a plan file carries
//! everything the core reads through its provider boundary: profile,
//! windows, logged entries, and the daily-sync flag.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use macroplan_core::{DataProvider, LoggedEntry, Profile, ProviderError, Window};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    pub profile: Profile,
    pub windows: Vec<Window>,
    #[serde(default)]
    pub entries: Vec<LoggedEntry>,
    #[serde(default)]
    pub daily_sync_completed: bool,
}

impl PlanFile {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        let plan: PlanFile = serde_json::from_str(&raw)
            .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;
        Ok(plan)
    }
}

/// Read-only provider serving a loaded plan file.
pub struct FileProvider {
    plan: PlanFile,
}

impl FileProvider {
    pub fn new(plan: PlanFile) -> Self {
        Self { plan }
    }
}

impl DataProvider for FileProvider {
    async fn windows(&self, _date: NaiveDate) -> Result<Vec<Window>, ProviderError> {
        Ok(self.plan.windows.clone())
    }

    async fn entries(&self, _date: NaiveDate) -> Result<Vec<LoggedEntry>, ProviderError> {
        Ok(self.plan.entries.clone())
    }

    async fn profile(&self) -> Result<Profile, ProviderError> {
        Ok(self.plan.profile.clone())
    }

    async fn daily_sync_completed(&self, _date: NaiveDate) -> Result<bool, ProviderError> {
        Ok(self.plan.daily_sync_completed)
    }
}
