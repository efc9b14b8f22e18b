//! # Macroplan Core Library
//!
//! Core business logic for Macroplan, a live, self-correcting daily
//! nutrition plan. The CLI binary and any GUI front-end are thin layers
//! over this library.
//!
//! ## Architecture
//!
//! - **Redistribution Engine**: a pure function recomputing upcoming
//!   windows' calorie/macro targets from consumption-to-date, with
//!   goal-specific bounds and macro-to-calorie reconciliation
//! - **Nudge Coordinator**: a single-owner tokio task evaluating candidate
//!   prompts on coarse/fine cadences, enforcing one-visible-at-a-time,
//!   priority ordering, cooldowns, and permanent dismissal
//! - **Storage**: TOML-backed key→timestamp store for cooldown persistence
//! - **Simulation**: deterministic day replay for regression testing
//!
//! ## Key Components
//!
//! - [`redistribute`]: the redistribution pass
//! - [`NudgeCoordinator`] / [`CoordinatorHandle`]: nudge scheduling
//! - [`DataProvider`]: async boundary to the app's data layer
//! - [`Clock`]: substitutable time source

pub mod clock;
pub mod error;
pub mod nudge;
pub mod plan;
pub mod provider;
pub mod redistribution;
pub mod simulation;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, ProviderError, StoreError};
pub use nudge::{
    CoordinatorHandle, DataEvent, NudgeCoordinator, NudgeKind, NudgePriority, NudgeQueue,
    NudgeQueueState, NudgeRequest,
};
pub use plan::{
    classify, ConsumedTotals, LoggedEntry, MacroTargets, PrimaryGoal, Profile, Window,
    WindowPurpose, WindowState,
};
pub use provider::DataProvider;
pub use redistribution::{redistribute, RedistributedWindow, RedistributionReason};
pub use simulation::{replay, DayScenario, DaySnapshot, MealEvent};
pub use storage::TimestampStore;
