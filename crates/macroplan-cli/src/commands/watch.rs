use std::path::Path;
use std::time::Duration;

use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

use macroplan_core::{NudgeCoordinator, NudgeKind, NudgeRequest, SystemClock, TimestampStore};

use crate::planfile::{FileProvider, PlanFile};

/// Run the coordinator against a plan file, printing nudges as they
/// surface. Visible nudges are auto-dismissed after `dismiss_after`
/// seconds so queued ones get their turn.
pub fn run(
    file: &Path,
    for_secs: Option<u64>,
    dismiss_after: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let plan = PlanFile::load(file)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let store = TimestampStore::open_default()?;
        tracing::info!(store = %store.path().display(), "watching plan");
        let (handle, join) = NudgeCoordinator::spawn(FileProvider::new(plan), SystemClock, store);

        let stop_at = for_secs.map(|s| Instant::now() + Duration::from_secs(s));
        let mut active = handle.watch_active();
        let mut dismiss_at: Option<Instant> = None;

        loop {
            tokio::select! {
                changed = active.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let current = active.borrow().clone();
                    match current {
                        Some(nudge) => {
                            tracing::info!(identity = %nudge.identity, "nudge visible");
                            println!("[{:?}] {}", nudge.priority, describe(&nudge));
                            dismiss_at = Some(Instant::now() + Duration::from_secs(dismiss_after));
                        }
                        None => dismiss_at = None,
                    }
                }
                _ = sleep_opt(dismiss_at) => {
                    dismiss_at = None;
                    tracing::debug!("auto-dismissing visible nudge");
                    handle.dismiss_current().await;
                }
                _ = sleep_opt(stop_at) => break,
            }
        }

        handle.shutdown().await;
        let _ = join.await;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

async fn sleep_opt(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn describe(nudge: &NudgeRequest) -> String {
    match &nudge.kind {
        NudgeKind::DailySync => "time for your daily sync".to_string(),
        NudgeKind::ActiveWindowReminder {
            window_id,
            minutes_left,
        } => format!("window {window_id} is open for another {minutes_left} min -- log a meal"),
        NudgeKind::Celebration { entry_id } => format!("meal {entry_id} logged, nice work"),
        NudgeKind::Tutorial { page } => format!("tutorial page {page}"),
    }
}
