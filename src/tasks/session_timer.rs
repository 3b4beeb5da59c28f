//! Session tick driver background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info};

use crate::{
    engine::{TimerState, TimerStatus},
    state::AppState,
};

/// Period between engine ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

fn is_running(snapshot_rx: &mut watch::Receiver<Option<TimerState>>) -> bool {
    snapshot_rx
        .borrow_and_update()
        .as_ref()
        .map(|s| s.status == TimerStatus::Running)
        .unwrap_or(false)
}

/// Background task that ticks the session once per second while it runs
///
/// The interval only exists while the published snapshot is running; a
/// pause, cancel or completion drops it, and the next resume or start
/// creates a fresh one.
pub async fn session_timer_task(state: Arc<AppState>) {
    info!("Starting session timer task");

    let mut snapshot_rx = state.snapshot_tx.subscribe();

    loop {
        if !is_running(&mut snapshot_rx) {
            // Wait for a snapshot change notification
            if snapshot_rx.changed().await.is_err() {
                info!("Snapshot channel closed, stopping session timer task");
                return;
            }
            continue;
        }

        debug!("Session running, starting tick interval");
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

        loop {
            tokio::select! {
                // Timer tick - advance the engine
                _ = interval.tick() => {
                    match state.tick_session() {
                        Ok(Some(snapshot)) if snapshot.status == TimerStatus::Running => {}
                        Ok(Some(snapshot)) => {
                            debug!("Session {} after tick, stopping interval", snapshot.status);
                            break;
                        }
                        Ok(None) => break,
                        Err(e) => {
                            error!("Failed to tick session: {}", e);
                            break;
                        }
                    }
                }

                // Snapshot change - stop ticking once the session leaves running
                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        info!("Snapshot channel closed, stopping session timer task");
                        return;
                    }
                    if !is_running(&mut snapshot_rx) {
                        debug!("Session no longer running, stopping interval");
                        break;
                    }
                }
            }
        }
    }
}
