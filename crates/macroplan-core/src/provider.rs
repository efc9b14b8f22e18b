//! Asynchronous data access boundary.
//!
//! The coordinator reads windows, entries, profile, and daily-sync status
//! through this trait. Every method is fallible; the coordinator collapses
//! any error into "no data this pass" rather than surfacing it.

use std::future::Future;

use chrono::NaiveDate;

use crate::error::ProviderError;
use crate::plan::{LoggedEntry, Profile, Window};

/// Read access to the day's plan data.
///
/// Implementations live outside the core (app storage, sync layer); tests
/// and the CLI ship small file- or memory-backed ones.
pub trait DataProvider: Send + Sync {
    /// Windows planned for the given day, ordered by start time.
    fn windows(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Window>, ProviderError>> + Send;

    /// Everything logged on the given day.
    fn entries(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<LoggedEntry>, ProviderError>> + Send;

    /// The user's profile, if one exists.
    fn profile(&self) -> impl Future<Output = Result<Profile, ProviderError>> + Send;

    /// Whether the mandatory daily sync has been completed for the day.
    fn daily_sync_completed(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<bool, ProviderError>> + Send;
}
