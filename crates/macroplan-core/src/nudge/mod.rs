//! Proactive prompts ("nudges") and their coordination.
//!
//! A nudge is an ephemeral prompt competing for a single visible slot:
//! - [`NudgeKind`]: what the prompt is about, with per-variant payloads
//! - [`NudgeQueue`]: the per-identity state machine (active slot, pending
//!   queue, permanent dismissal, cooldowns)
//! - [`NudgeCoordinator`]: the owning task that evaluates candidates on
//!   coarse/fine cadences and serializes all state mutation

pub mod coordinator;
pub mod queue;

pub use coordinator::{CoordinatorHandle, DataEvent, NudgeCoordinator};
pub use queue::{NudgeQueue, NudgeQueueState, TriggerOutcome};

use serde::{Deserialize, Serialize};

use crate::plan::{EntryId, WindowId};

/// Minutes a recurring identity stays suppressed after being shown.
pub const COOLDOWN_MINUTES: i64 = 30;

/// How urgently a nudge wants the visible slot.
///
/// Variants are declared in ascending order so `Ord` ranks Critical highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgePriority {
    /// Reserved, unused.
    Subtle,
    Gentle,
    Prominent,
    Critical,
}

/// What a nudge is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NudgeKind {
    /// Mandatory daily sync has not been completed yet.
    DailySync,
    /// An active window has gone unlogged for too long.
    ActiveWindowReminder {
        window_id: WindowId,
        minutes_left: i64,
    },
    /// A meal was just logged.
    Celebration { entry_id: EntryId },
    /// Onboarding tutorial page.
    Tutorial { page: u32 },
}

impl NudgeKind {
    /// Stable deduplication key: kind plus the entity it is about.
    pub fn identity(&self) -> String {
        match self {
            NudgeKind::DailySync => "daily_sync".to_string(),
            NudgeKind::ActiveWindowReminder { window_id, .. } => {
                format!("window_reminder_{window_id}")
            }
            NudgeKind::Celebration { entry_id } => format!("celebration_{entry_id}"),
            NudgeKind::Tutorial { page } => format!("tutorial_{page}"),
        }
    }

    pub fn priority(&self) -> NudgePriority {
        match self {
            NudgeKind::DailySync => NudgePriority::Critical,
            NudgeKind::ActiveWindowReminder { .. } => NudgePriority::Prominent,
            NudgeKind::Celebration { .. } | NudgeKind::Tutorial { .. } => NudgePriority::Gentle,
        }
    }

    /// Single-shot kinds are permanently dismissed after one showing.
    pub fn is_single_shot(&self) -> bool {
        matches!(
            self,
            NudgeKind::Celebration { .. } | NudgeKind::Tutorial { .. }
        )
    }
}

/// A candidate prompt produced by an evaluation pass or an external caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NudgeRequest {
    pub kind: NudgeKind,
    pub identity: String,
    pub priority: NudgePriority,
}

impl NudgeRequest {
    /// Build a request with identity and priority derived from the kind.
    pub fn new(kind: NudgeKind) -> Self {
        let identity = kind.identity();
        let priority = kind.priority();
        Self {
            kind,
            identity,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ordering_ranks_critical_highest() {
        assert!(NudgePriority::Critical > NudgePriority::Prominent);
        assert!(NudgePriority::Prominent > NudgePriority::Gentle);
        assert!(NudgePriority::Gentle > NudgePriority::Subtle);
    }

    #[test]
    fn identities_are_stable_per_entity() {
        let a = NudgeKind::ActiveWindowReminder {
            window_id: "w1".into(),
            minutes_left: 40,
        };
        let b = NudgeKind::ActiveWindowReminder {
            window_id: "w1".into(),
            minutes_left: 12,
        };
        // The payload may differ between passes; the identity must not.
        assert_eq!(a.identity(), b.identity());

        let other = NudgeKind::ActiveWindowReminder {
            window_id: "w2".into(),
            minutes_left: 40,
        };
        assert_ne!(a.identity(), other.identity());
    }

    #[test]
    fn single_shot_kinds() {
        assert!(NudgeKind::Tutorial { page: 1 }.is_single_shot());
        assert!(NudgeKind::Celebration { entry_id: "e".into() }.is_single_shot());
        assert!(!NudgeKind::DailySync.is_single_shot());
        assert!(!NudgeKind::ActiveWindowReminder {
            window_id: "w".into(),
            minutes_left: 5
        }
        .is_single_shot());
    }

    #[test]
    fn request_derives_identity_and_priority() {
        let req = NudgeRequest::new(NudgeKind::DailySync);
        assert_eq!(req.identity, "daily_sync");
        assert_eq!(req.priority, NudgePriority::Critical);
    }
}
