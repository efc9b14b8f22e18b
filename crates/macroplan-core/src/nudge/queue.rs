//! Nudge queue state machine.
//!
//! Tracks the single active slot, the pending queue, permanent dismissals,
//! and per-identity last-shown times. Synchronous and clock-injected; the
//! coordinator actor is its only owner at runtime, which is what makes the
//! "at most one active nudge" invariant hold without locking.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{NudgeRequest, COOLDOWN_MINUTES};

/// What `trigger` did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The request took the empty active slot.
    Activated,
    /// A nudge was already visible; the request joined the pending queue.
    Queued,
    /// The identity was permanently dismissed this session.
    DroppedDismissed,
    /// The identity is already active or already waiting in the queue.
    DroppedDuplicate,
}

/// Immutable snapshot of the queue for display layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NudgeQueueState {
    pub active: Option<NudgeRequest>,
    pub pending: Vec<NudgeRequest>,
    pub permanently_dismissed: Vec<String>,
    pub last_shown: HashMap<String, DateTime<Utc>>,
}

/// The per-identity nudge state machine.
#[derive(Debug, Default)]
pub struct NudgeQueue {
    active: Option<NudgeRequest>,
    /// Descending priority; stable on ties by arrival.
    pending: Vec<NudgeRequest>,
    permanently_dismissed: HashSet<String>,
    last_shown: HashMap<String, DateTime<Utc>>,
}

impl NudgeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed last-shown times from the persistent store so cooldowns survive
    /// a restart.
    pub fn with_last_shown(last_shown: HashMap<String, DateTime<Utc>>) -> Self {
        Self {
            last_shown,
            ..Self::default()
        }
    }

    pub fn active(&self) -> Option<&NudgeRequest> {
        self.active.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_permanently_dismissed(&self, identity: &str) -> bool {
        self.permanently_dismissed.contains(identity)
    }

    /// Whether the identity was shown within the last 30 minutes.
    pub fn is_on_cooldown(&self, identity: &str, now: DateTime<Utc>) -> bool {
        self.last_shown
            .get(identity)
            .is_some_and(|shown| now - *shown < Duration::minutes(COOLDOWN_MINUTES))
    }

    /// Whether an evaluation pass may reissue this identity: neither
    /// permanently dismissed nor inside its cooldown window.
    pub fn may_issue(&self, identity: &str, now: DateTime<Utc>) -> bool {
        !self.is_permanently_dismissed(identity) && !self.is_on_cooldown(identity, now)
    }

    /// Offer a request the visible slot, or queue it behind the current one.
    pub fn trigger(&mut self, request: NudgeRequest, now: DateTime<Utc>) -> TriggerOutcome {
        if self.is_permanently_dismissed(&request.identity) {
            return TriggerOutcome::DroppedDismissed;
        }
        let already_present = self
            .active
            .as_ref()
            .is_some_and(|a| a.identity == request.identity)
            || self.pending.iter().any(|p| p.identity == request.identity);
        if already_present {
            return TriggerOutcome::DroppedDuplicate;
        }

        match self.active {
            None => {
                self.mark_shown(&request.identity, now);
                self.active = Some(request);
                TriggerOutcome::Activated
            }
            Some(_) => {
                self.pending.push(request);
                // Stable sort: equal priorities keep arrival order.
                self.pending.sort_by(|a, b| b.priority.cmp(&a.priority));
                TriggerOutcome::Queued
            }
        }
    }

    /// Clear the active slot. Single-shot kinds are dismissed permanently.
    ///
    /// Returns the dismissed request, if any. The caller decides when (and
    /// whether) to promote the next queued nudge via [`promote_next`].
    ///
    /// [`promote_next`]: NudgeQueue::promote_next
    pub fn dismiss(&mut self) -> Option<NudgeRequest> {
        let dismissed = self.active.take()?;
        if dismissed.kind.is_single_shot() {
            self.permanently_dismissed.insert(dismissed.identity.clone());
        }
        Some(dismissed)
    }

    /// Pop the highest-priority pending request into the empty active slot.
    ///
    /// Skips anything that was permanently dismissed while waiting. No-op if
    /// a nudge is already visible.
    pub fn promote_next(&mut self, now: DateTime<Utc>) -> Option<&NudgeRequest> {
        if self.active.is_some() {
            return None;
        }
        while !self.pending.is_empty() {
            let next = self.pending.remove(0);
            if self.is_permanently_dismissed(&next.identity) {
                continue;
            }
            self.mark_shown(&next.identity, now);
            self.active = Some(next);
            return self.active.as_ref();
        }
        None
    }

    fn mark_shown(&mut self, identity: &str, now: DateTime<Utc>) {
        self.last_shown.insert(identity.to_string(), now);
    }

    pub fn last_shown(&self) -> &HashMap<String, DateTime<Utc>> {
        &self.last_shown
    }

    pub fn snapshot(&self) -> NudgeQueueState {
        NudgeQueueState {
            active: self.active.clone(),
            pending: self.pending.clone(),
            permanently_dismissed: self.permanently_dismissed.iter().cloned().collect(),
            last_shown: self.last_shown.clone(),
        }
    }
}
