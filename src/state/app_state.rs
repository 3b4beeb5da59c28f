//! Main application state management

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{ChannelObserver, SessionError, SessionEvent};
use crate::{
    engine::{EngineError, SegmentedTimerEngine, TimerConfig, TimerState},
    services::{Notification, SessionStore},
};

/// How many notifications are kept for clients to poll
pub const NOTIFICATION_LIMIT: usize = 20;

/// The live session: one engine plus when it was started
#[derive(Debug)]
pub struct ActiveSession {
    pub engine: SegmentedTimerEngine<ChannelObserver>,
    pub started_at: DateTime<Utc>,
}

/// Main application state that owns the session and its collaborators
#[derive(Debug)]
pub struct AppState {
    /// Current session; every command and tick goes through this lock
    pub session: Mutex<Option<ActiveSession>>,
    /// Session shape used when a start request does not override it
    pub default_config: TimerConfig,
    /// Finished-session persistence
    pub history: Arc<dyn SessionStore>,
    /// Most recent notifications, newest last
    pub notifications: Mutex<VecDeque<Notification>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Engine callbacks, fanned out to background tasks
    pub event_tx: broadcast::Sender<SessionEvent>,
    /// Latest snapshot, drives the tick task
    pub snapshot_tx: watch::Sender<Option<TimerState>>,
}

impl AppState {
    /// Create a new AppState with no session
    pub fn new(
        port: u16,
        host: String,
        default_config: TimerConfig,
        history: Arc<dyn SessionStore>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, _) = watch::channel(None);

        Self {
            session: Mutex::new(None),
            default_config,
            history,
            notifications: Mutex::new(VecDeque::with_capacity(NOTIFICATION_LIMIT)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            event_tx,
            snapshot_tx,
        }
    }

    /// Start a new session, replacing a finished one if present
    pub fn start_session(&self, config: TimerConfig) -> Result<TimerState, SessionError> {
        let mut session = self.lock_session()?;

        if let Some(current) = session.as_ref() {
            let status = current.engine.status();
            if !status.is_terminal() {
                return Err(SessionError::AlreadyActive(status));
            }
        }

        let observer = ChannelObserver::new(self.event_tx.clone(), config);
        let mut engine = SegmentedTimerEngine::new(config, observer);
        engine.start()?;
        let snapshot = engine.snapshot();

        *session = Some(ActiveSession {
            engine,
            started_at: Utc::now(),
        });
        drop(session);

        self.record_action("start");
        self.publish_snapshot(Some(snapshot.clone()));
        Ok(snapshot)
    }

    /// Pause the running session
    pub fn pause_session(&self) -> Result<TimerState, SessionError> {
        self.command("pause", |engine| engine.pause())
    }

    /// Resume the paused session
    pub fn resume_session(&self) -> Result<TimerState, SessionError> {
        self.command("resume", |engine| engine.resume())
    }

    /// Cancel the running or paused session
    pub fn cancel_session(&self) -> Result<TimerState, SessionError> {
        self.command("cancel", |engine| engine.cancel())
    }

    /// Advance the session by one second
    ///
    /// Returns the snapshot after the tick, or `None` without a session.
    pub fn tick_session(&self) -> Result<Option<TimerState>, SessionError> {
        let mut session = self.lock_session()?;
        let Some(active) = session.as_mut() else {
            return Ok(None);
        };

        let outcome = active.engine.tick();
        let snapshot = active.engine.snapshot();
        drop(session);

        debug!("Tick: {:?}", outcome);
        self.publish_snapshot(Some(snapshot.clone()));
        Ok(Some(snapshot))
    }

    /// Get the current session snapshot and its config
    pub fn get_session(
        &self,
    ) -> Result<Option<(TimerState, TimerConfig, DateTime<Utc>)>, SessionError> {
        let session = self.lock_session()?;
        Ok(session.as_ref().map(|active| {
            (
                active.engine.snapshot(),
                *active.engine.config(),
                active.started_at,
            )
        }))
    }

    /// Store a notification, dropping the oldest past the limit
    pub fn push_notification(&self, notification: Notification) {
        match self.notifications.lock() {
            Ok(mut notifications) => {
                if notifications.len() == NOTIFICATION_LIMIT {
                    notifications.pop_front();
                }
                notifications.push_back(notification);
            }
            Err(e) => warn!("Failed to lock notifications: {}", e),
        }
    }

    /// Get stored notifications, oldest first
    pub fn get_notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn command<F>(&self, action: &str, apply: F) -> Result<TimerState, SessionError>
    where
        F: FnOnce(&mut SegmentedTimerEngine<ChannelObserver>) -> Result<(), EngineError>,
    {
        let mut session = self.lock_session()?;
        let active = session.as_mut().ok_or(SessionError::NoSession)?;

        apply(&mut active.engine)?;
        let snapshot = active.engine.snapshot();
        drop(session); // Release the lock early

        info!("Session {}: now {}", action, snapshot.status);
        self.record_action(action);
        self.publish_snapshot(Some(snapshot.clone()));
        Ok(snapshot)
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, Option<ActiveSession>>, SessionError> {
        self.session
            .lock()
            .map_err(|e| SessionError::Lock(e.to_string()))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish_snapshot(&self, snapshot: Option<TimerState>) {
        // send_replace keeps the value even while no task is watching
        self.snapshot_tx.send_replace(snapshot);
    }
}
