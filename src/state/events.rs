//! Session events published to the rest of the host

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::engine::{SessionObserver, TimerConfig, TimerState};

/// Engine callback, turned into data the host can fan out
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Progress {
        segment_progress_percent: f64,
        state: TimerState,
    },
    MilestoneReached {
        milestone: u32,
        /// Shape of the session that emitted the milestone
        config: TimerConfig,
        state: TimerState,
    },
    Completed {
        state: TimerState,
    },
    Cancelled {
        state: TimerState,
    },
}

impl SessionEvent {
    pub fn state(&self) -> &TimerState {
        match self {
            SessionEvent::Progress { state, .. }
            | SessionEvent::MilestoneReached { state, .. }
            | SessionEvent::Completed { state }
            | SessionEvent::Cancelled { state } => state,
        }
    }
}

/// Observer that forwards engine callbacks onto a broadcast channel
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: broadcast::Sender<SessionEvent>,
    config: TimerConfig,
}

impl ChannelObserver {
    pub fn new(tx: broadcast::Sender<SessionEvent>, config: TimerConfig) -> Self {
        Self { tx, config }
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine, the snapshot channel still carries the state
        if self.tx.send(event).is_err() {
            debug!("No subscribers for session event");
        }
    }
}

impl SessionObserver for ChannelObserver {
    fn on_progress(&mut self, segment_progress_percent: f64, state: &TimerState) {
        self.publish(SessionEvent::Progress {
            segment_progress_percent,
            state: state.clone(),
        });
    }

    fn on_milestone_reached(&mut self, milestone: u32, state: &TimerState) {
        self.publish(SessionEvent::MilestoneReached {
            milestone,
            config: self.config,
            state: state.clone(),
        });
    }

    fn on_completed(&mut self, final_state: &TimerState) {
        self.publish(SessionEvent::Completed {
            state: final_state.clone(),
        });
    }

    fn on_cancelled(&mut self, state: &TimerState) {
        self.publish(SessionEvent::Cancelled {
            state: state.clone(),
        });
    }
}
