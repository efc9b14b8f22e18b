//! Nudge coordinator actor.
//!
//! A single tokio task owns every piece of nudge state. Two interval tick
//! streams (coarse day-level checks, fine per-window liveness) and a command
//! channel all drain into the same select loop, so evaluation passes are
//! single-flight by construction and cross-context triggers are marshaled
//! onto the owner task. Provider read failures are logged and absorbed; the
//! next scheduled pass retries independently.
//!
//! The delayed "promote next queued nudge" timer lives inside the loop, so
//! tearing the actor down (dropping the handle or sending shutdown) kills it
//! with everything else -- it cannot fire into stale state.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};

use super::queue::{NudgeQueue, TriggerOutcome};
use super::{NudgeKind, NudgeRequest};
use crate::clock::Clock;
use crate::plan::{classify, LoggedEntry, Window, WindowState};
use crate::provider::DataProvider;
use crate::storage::TimestampStore;

/// Day-level checks (daily sync).
pub const COARSE_INTERVAL: StdDuration = StdDuration::from_secs(5 * 60);
/// Per-window liveness checks.
pub const FINE_INTERVAL: StdDuration = StdDuration::from_secs(60);
/// Pause between dismissing one nudge and surfacing the next.
pub const DISMISS_DELAY: StdDuration = StdDuration::from_secs(2);

/// How long a window must have been active, unlogged, before reminding.
const ACTIVE_WINDOW_GRACE_MINUTES: i64 = 15;
/// Store key for the last coarse-check time; everything else in the store
/// is a nudge identity.
const LAST_COARSE_CHECK_KEY: &str = "last_coarse_check";

/// Data-change notifications from the rest of the app.
#[derive(Debug, Clone)]
pub enum DataEvent {
    /// A new meal entry was logged.
    EntryLogged { entry_id: String },
    /// The day's windows were regenerated (day start or check-in).
    WindowsRegenerated,
}

enum Command {
    Trigger(NudgeRequest),
    Dismiss,
    Data(DataEvent),
    Shutdown,
}

/// Cheap cloneable front for the coordinator task.
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<Command>,
    active: watch::Receiver<Option<NudgeRequest>>,
}

impl CoordinatorHandle {
    /// Offer a request for display. Queued behind the current nudge if one
    /// is visible.
    pub async fn trigger_nudge(&self, request: NudgeRequest) {
        let _ = self.tx.send(Command::Trigger(request)).await;
    }

    /// Dismiss whatever nudge is currently visible.
    pub async fn dismiss_current(&self) {
        let _ = self.tx.send(Command::Dismiss).await;
    }

    /// Tell the coordinator about a data change worth re-evaluating for.
    pub async fn notify(&self, event: DataEvent) {
        let _ = self.tx.send(Command::Data(event)).await;
    }

    /// Ask the actor to stop. Dropping every handle has the same effect.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(Command::Shutdown).await;
    }

    /// Snapshot of the currently visible nudge.
    pub fn active_nudge(&self) -> Option<NudgeRequest> {
        self.active.borrow().clone()
    }

    pub fn has_active_nudge(&self) -> bool {
        self.active.borrow().is_some()
    }

    /// Watch stream of active-slot changes, for display layers that want to
    /// diff snapshots themselves.
    pub fn watch_active(&self) -> watch::Receiver<Option<NudgeRequest>> {
        self.active.clone()
    }
}

/// The actor: single owner of queue, cooldown, and dismissal state.
pub struct NudgeCoordinator<P, C> {
    provider: P,
    clock: C,
    store: TimestampStore,
    queue: NudgeQueue,
    rx: mpsc::Receiver<Command>,
    active_tx: watch::Sender<Option<NudgeRequest>>,
    promote_at: Option<Instant>,
}

impl<P, C> NudgeCoordinator<P, C>
where
    P: DataProvider + 'static,
    C: Clock + 'static,
{
    /// Spawn the coordinator task, seeding cooldowns from the store.
    pub fn spawn(provider: P, clock: C, store: TimestampStore) -> (CoordinatorHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(32);
        let (active_tx, active_rx) = watch::channel(None);

        let last_shown = store
            .all()
            .filter(|(key, _)| *key != LAST_COARSE_CHECK_KEY)
            .map(|(key, at)| (key.to_string(), at))
            .collect();

        let actor = Self {
            provider,
            clock,
            store,
            queue: NudgeQueue::with_last_shown(last_shown),
            rx,
            active_tx,
            promote_at: None,
        };
        let join = tokio::spawn(actor.run());

        (
            CoordinatorHandle {
                tx,
                active: active_rx,
            },
            join,
        )
    }

    async fn run(mut self) {
        let mut coarse = interval(COARSE_INTERVAL);
        let mut fine = interval(FINE_INTERVAL);
        coarse.set_missed_tick_behavior(MissedTickBehavior::Delay);
        fine.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = self.rx.recv() => match cmd {
                    Some(Command::Trigger(request)) => self.apply_trigger(request),
                    Some(Command::Dismiss) => self.dismiss(),
                    Some(Command::Data(event)) => self.handle_data_event(event).await,
                    Some(Command::Shutdown) | None => break,
                },
                _ = coarse.tick() => self.coarse_pass().await,
                _ = fine.tick() => self.fine_pass().await,
                _ = promote_deadline(self.promote_at) => self.promote(),
            }
        }
        tracing::debug!("nudge coordinator stopped");
    }

    // ── Evaluation passes ────────────────────────────────────────────

    /// Day-level checks: mandatory daily sync.
    async fn coarse_pass(&mut self) {
        let now = self.clock.now();
        match self.provider.daily_sync_completed(now.date_naive()).await {
            Ok(false) => self.submit_evaluated(NudgeRequest::new(NudgeKind::DailySync), now),
            Ok(true) => {}
            Err(e) => tracing::warn!(error = %e, "coarse evaluation pass skipped"),
        }
        if let Err(e) = self.store.set(LAST_COARSE_CHECK_KEY, now) {
            tracing::warn!(error = %e, "failed to persist coarse-check time");
        }
    }

    /// Per-window liveness: active, unlogged, and past the grace period.
    async fn fine_pass(&mut self) {
        let now = self.clock.now();
        let date = now.date_naive();

        let windows = match self.provider.windows(date).await {
            Ok(windows) => windows,
            Err(e) => {
                tracing::warn!(error = %e, "fine evaluation pass skipped");
                return;
            }
        };
        let entries = match self.provider.entries(date).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "fine evaluation pass skipped");
                return;
            }
        };

        for request in window_liveness_requests(&windows, &entries, now) {
            self.submit_evaluated(request, now);
        }
    }

    async fn handle_data_event(&mut self, event: DataEvent) {
        match event {
            DataEvent::EntryLogged { entry_id } => {
                let now = self.clock.now();
                self.submit_evaluated(NudgeRequest::new(NudgeKind::Celebration { entry_id }), now);
            }
            DataEvent::WindowsRegenerated => self.fine_pass().await,
        }
    }

    /// Gate an evaluation-produced request behind dismissal and cooldown
    /// before offering it to the queue.
    fn submit_evaluated(&mut self, request: NudgeRequest, now: DateTime<Utc>) {
        if !self.queue.may_issue(&request.identity, now) {
            tracing::debug!(identity = %request.identity, "nudge suppressed");
            return;
        }
        self.apply_trigger(request);
    }

    // ── State transitions ────────────────────────────────────────────

    fn apply_trigger(&mut self, request: NudgeRequest) {
        let now = self.clock.now();
        let identity = request.identity.clone();
        match self.queue.trigger(request, now) {
            TriggerOutcome::Activated => {
                tracing::info!(identity = %identity, "nudge activated");
                self.record_shown(&identity, now);
                self.publish_active();
            }
            TriggerOutcome::Queued => tracing::debug!(identity = %identity, "nudge queued"),
            TriggerOutcome::DroppedDismissed | TriggerOutcome::DroppedDuplicate => {
                tracing::debug!(identity = %identity, "nudge dropped")
            }
        }
    }

    fn dismiss(&mut self) {
        if let Some(dismissed) = self.queue.dismiss() {
            tracing::info!(identity = %dismissed.identity, "nudge dismissed");
            self.publish_active();
            if self.queue.has_pending() {
                self.promote_at = Some(Instant::now() + DISMISS_DELAY);
            }
        }
    }

    fn promote(&mut self) {
        self.promote_at = None;
        let now = self.clock.now();
        if let Some(promoted) = self.queue.promote_next(now) {
            let identity = promoted.identity.clone();
            tracing::info!(identity = %identity, "nudge promoted from queue");
            self.record_shown(&identity, now);
            self.publish_active();
        }
    }

    fn record_shown(&mut self, identity: &str, now: DateTime<Utc>) {
        if let Err(e) = self.store.set(identity, now) {
            tracing::warn!(error = %e, identity, "failed to persist last-shown time");
        }
    }

    fn publish_active(&self) {
        self.active_tx.send_replace(self.queue.active().cloned());
    }
}

async fn promote_deadline(at: Option<Instant>) {
    match at {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Reminder candidates: windows that are active, past the grace period, and
/// have nothing logged against them.
fn window_liveness_requests(
    windows: &[Window],
    entries: &[LoggedEntry],
    now: DateTime<Utc>,
) -> Vec<NudgeRequest> {
    windows
        .iter()
        .filter(|w| classify(w, now) == WindowState::Active)
        .filter(|w| now - w.start_time >= Duration::minutes(ACTIVE_WINDOW_GRACE_MINUTES))
        .filter(|w| !entries.iter().any(|e| entry_belongs_to(e, w)))
        .map(|w| {
            NudgeRequest::new(NudgeKind::ActiveWindowReminder {
                window_id: w.id.clone(),
                minutes_left: w.minutes_left(now),
            })
        })
        .collect()
}

/// An entry counts toward a window when it was logged against it, or --
/// for untagged entries -- when its timestamp falls inside the window.
fn entry_belongs_to(entry: &LoggedEntry, window: &Window) -> bool {
    match &entry.window_id {
        Some(id) => *id == window.id,
        None => entry.timestamp >= window.start_time && entry.timestamp <= window.end_time,
    }
}
