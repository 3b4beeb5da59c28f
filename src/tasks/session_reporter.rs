//! Session reporter background task

use std::sync::Arc;
use chrono::Utc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    services::{
        cancellation_notification, completion_notification, milestone_notification,
        SessionRecord,
    },
    state::{AppState, SessionEvent},
};

/// React to one engine event: notify on milestones, record finished sessions
pub async fn handle_session_event(state: &AppState, event: &SessionEvent) {
    match event {
        SessionEvent::Progress { segment_progress_percent, state: snapshot } => {
            debug!(
                "Segment {} at {:.1}%",
                snapshot.current_segment_index, segment_progress_percent
            );
        }
        SessionEvent::MilestoneReached { milestone, config, .. } => {
            let notification = milestone_notification(*milestone, config);
            info!("{}: {}", notification.title, notification.message);
            state.push_notification(notification);
        }
        SessionEvent::Completed { state: snapshot } => {
            let notification = completion_notification(snapshot);
            info!("{}: {}", notification.title, notification.message);
            state.push_notification(notification);
            record_session(state, event).await;
        }
        SessionEvent::Cancelled { state: snapshot } => {
            state.push_notification(cancellation_notification(snapshot));
            record_session(state, event).await;
        }
    }
}

async fn record_session(state: &AppState, event: &SessionEvent) {
    let record = SessionRecord::from_final_state(event.state(), Utc::now());
    let history = Arc::clone(&state.history);

    // Store writes are blocking file I/O
    let result = tokio::task::spawn_blocking(move || {
        history.append(&record).map(|()| record)
    })
    .await;

    match result {
        Ok(Ok(record)) => info!(
            "Recorded {} session of {}s",
            if record.completed { "completed" } else { "cancelled" },
            record.total_elapsed_seconds
        ),
        Ok(Err(e)) => error!("Failed to record session: {:#}", e),
        Err(e) => error!("Session record task failed: {}", e),
    }
}

/// Background task that forwards engine events to the collaborators
pub async fn session_reporter_task(state: Arc<AppState>) {
    info!("Starting session reporter task");

    let mut event_rx = state.event_tx.subscribe();

    loop {
        match event_rx.recv().await {
            Ok(event) => handle_session_event(&state, &event).await,
            Err(RecvError::Lagged(skipped)) => {
                warn!("Session reporter lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Session event channel closed, stopping reporter");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::TimerConfig,
        services::{MemorySessionStore, NotificationKind, SessionStore},
    };

    fn app_state(store: Arc<MemorySessionStore>) -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), TimerConfig::new(1, 3).unwrap(), store)
    }

    #[tokio::test]
    async fn completed_session_is_recorded_and_announced() {
        let store = Arc::new(MemorySessionStore::new());
        let state = app_state(store.clone());
        let mut events = state.event_tx.subscribe();

        state.start_session(state.default_config).unwrap();
        for _ in 0..3 {
            state.tick_session().unwrap();
        }
        while let Ok(event) = events.try_recv() {
            handle_session_event(&state, &event).await;
        }

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].completed);
        assert_eq!(records[0].total_elapsed_seconds, 3);
        assert_eq!(records[0].milestones_reached, 2);

        let kinds: Vec<_> = state.get_notifications().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::Milestone,
                NotificationKind::Milestone,
                NotificationKind::Completed
            ]
        );
    }

    #[tokio::test]
    async fn cancelled_session_is_recorded() {
        let store = Arc::new(MemorySessionStore::new());
        let state = app_state(store.clone());
        let mut events = state.event_tx.subscribe();

        state.start_session(TimerConfig::new(10, 2).unwrap()).unwrap();
        state.tick_session().unwrap();
        state.cancel_session().unwrap();
        while let Ok(event) = events.try_recv() {
            handle_session_event(&state, &event).await;
        }

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].completed);
        assert_eq!(records[0].total_elapsed_seconds, 1);
        assert_eq!(records[0].milestones_reached, 0);
    }

    #[tokio::test]
    async fn milestone_message_uses_the_emitting_session() {
        let store = Arc::new(MemorySessionStore::new());
        let state = app_state(store);
        let mut events = state.event_tx.subscribe();

        state.start_session(TimerConfig::new(1, 8).unwrap()).unwrap();
        state.tick_session().unwrap();
        state.tick_session().unwrap();
        state.cancel_session().unwrap();
        // A new session with a different shape replaces it before the
        // queued milestones are handled
        state.start_session(TimerConfig::new(1, 4).unwrap()).unwrap();

        while let Ok(event) = events.try_recv() {
            handle_session_event(&state, &event).await;
        }

        let messages: Vec<_> = state
            .get_notifications()
            .into_iter()
            .filter(|n| n.kind == NotificationKind::Milestone)
            .map(|n| n.message)
            .collect();
        assert_eq!(messages[1], "Block 2 of 8 finished.");
    }
}
