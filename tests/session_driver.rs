// Runs the background tasks against a paused tokio clock, so a multi-second
// session finishes instantly and deterministically.

use std::{sync::Arc, time::Duration};

use tokio::{sync::broadcast, time::Instant};

use focus_session::{
    services::{JsonlSessionStore, MemorySessionStore, NotificationKind, SessionStore},
    state::{AppState, SessionEvent},
    tasks::{session_reporter_task, session_timer_task},
    TimerConfig, TimerStatus,
};

fn app_state(segment: u64, segments: u32) -> Arc<AppState> {
    Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        TimerConfig::new(segment, segments).unwrap(),
        Arc::new(MemorySessionStore::new()),
    ))
}

async fn next_event(events: &mut broadcast::Receiver<SessionEvent>) -> SessionEvent {
    tokio::time::timeout(Duration::from_secs(60), events.recv())
        .await
        .expect("no session event within a minute")
        .expect("event channel closed")
}

#[tokio::test(start_paused = true)]
async fn driver_runs_session_to_completion() {
    let state = app_state(2, 2);
    let mut events = state.event_tx.subscribe();
    tokio::spawn(session_timer_task(Arc::clone(&state)));

    let started = Instant::now();
    state.start_session(state.default_config).unwrap();

    let mut milestones = Vec::new();
    loop {
        match next_event(&mut events).await {
            SessionEvent::MilestoneReached { milestone, .. } => milestones.push(milestone),
            SessionEvent::Completed { state: final_state } => {
                assert_eq!(final_state.elapsed_total_seconds, 4);
                break;
            }
            SessionEvent::Progress { .. } => {}
            SessionEvent::Cancelled { .. } => panic!("session was not cancelled"),
        }
    }

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(4), "{:?}", elapsed);
    assert!(elapsed < Duration::from_secs(5), "{:?}", elapsed);
    assert_eq!(milestones, vec![1]);

    // No ticks after completion
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(events.try_recv().is_err());
    let (snapshot, _, _) = state.get_session().unwrap().unwrap();
    assert_eq!(snapshot.status, TimerStatus::Completed);
}

#[tokio::test(start_paused = true)]
async fn paused_session_does_not_tick() {
    let state = app_state(2, 3);
    let mut events = state.event_tx.subscribe();
    tokio::spawn(session_timer_task(Arc::clone(&state)));

    state.start_session(state.default_config).unwrap();
    assert!(matches!(next_event(&mut events).await, SessionEvent::Progress { .. }));

    state.pause_session().unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(events.try_recv().is_err());
    let (snapshot, _, _) = state.get_session().unwrap().unwrap();
    assert_eq!(snapshot.elapsed_total_seconds, 1);

    state.resume_session().unwrap();
    match next_event(&mut events).await {
        SessionEvent::MilestoneReached { milestone, state: snapshot, .. } => {
            assert_eq!(milestone, 1);
            assert_eq!(snapshot.elapsed_total_seconds, 2);
            assert_eq!(snapshot.current_segment_index, 1);
        }
        other => panic!("expected milestone, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn cancelled_session_stops_ticking() {
    let state = app_state(6, 2);
    let mut events = state.event_tx.subscribe();
    tokio::spawn(session_timer_task(Arc::clone(&state)));

    state.start_session(state.default_config).unwrap();
    for _ in 0..3 {
        assert!(matches!(next_event(&mut events).await, SessionEvent::Progress { .. }));
    }

    state.cancel_session().unwrap();
    match next_event(&mut events).await {
        SessionEvent::Cancelled { state: snapshot } => {
            assert_eq!(snapshot.elapsed_total_seconds, 3);
            assert_eq!(snapshot.milestones_reached, 0);
        }
        other => panic!("expected cancellation, got {:?}", other),
    }

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(events.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn reporter_records_finished_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonlSessionStore::new(dir.path().join("history.jsonl")));
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        TimerConfig::new(1, 4).unwrap(),
        store.clone(),
    ));
    let mut events = state.event_tx.subscribe();
    tokio::spawn(session_timer_task(Arc::clone(&state)));
    tokio::spawn(session_reporter_task(Arc::clone(&state)));
    tokio::task::yield_now().await;

    state.start_session(state.default_config).unwrap();
    while !matches!(next_event(&mut events).await, SessionEvent::Completed { .. }) {}

    let mut records = Vec::new();
    for _ in 0..50 {
        records = store.load().unwrap();
        if !records.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(records.len(), 1);
    assert!(records[0].completed);
    assert_eq!(records[0].total_elapsed_seconds, 4);
    assert_eq!(records[0].milestones_reached, 3);

    let titles: Vec<_> = state
        .get_notifications()
        .into_iter()
        .filter(|n| n.kind == NotificationKind::Milestone)
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["First block done", "Halfway there", "Final stretch"]);
}
