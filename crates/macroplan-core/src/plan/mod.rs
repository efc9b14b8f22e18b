//! Domain model for the daily plan: windows, logged entries, and the
//! user profile.

pub mod entry;
pub mod profile;
pub mod window;

pub use entry::{ConsumedTotals, EntryId, LoggedEntry};
pub use profile::{PrimaryGoal, Profile};
pub use window::{classify, MacroTargets, Window, WindowId, WindowPurpose, WindowState};
