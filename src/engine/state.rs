//! Timer state structure and management

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TimerConfig;

/// Lifecycle of a focus session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
    Cancelled,
}

impl TimerStatus {
    /// Completed and cancelled sessions never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, TimerStatus::Completed | TimerStatus::Cancelled)
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
            TimerStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Snapshot of a session's countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub status: TimerStatus,
    /// Active segment, in `0..total_segments`
    pub current_segment_index: u32,
    pub remaining_in_segment_seconds: u64,
    /// Never decreases over the life of a session
    pub elapsed_total_seconds: u64,
    /// Segment boundaries crossed while more segments remained
    pub milestones_reached: u32,
}

impl TimerState {
    /// Create the idle state of a fresh session
    pub fn idle(config: &TimerConfig) -> Self {
        Self {
            status: TimerStatus::Idle,
            current_segment_index: 0,
            remaining_in_segment_seconds: config.segment_duration_seconds(),
            elapsed_total_seconds: 0,
            milestones_reached: 0,
        }
    }

    /// Check the counters against each other and against the config
    pub fn is_consistent_with(&self, config: &TimerConfig) -> bool {
        let segment = config.segment_duration_seconds();
        if self.current_segment_index >= config.total_segments()
            || self.remaining_in_segment_seconds > segment
        {
            return false;
        }

        let expected_elapsed = u64::from(self.current_segment_index) * segment
            + (segment - self.remaining_in_segment_seconds);

        self.elapsed_total_seconds == expected_elapsed
            && self.milestones_reached == self.current_segment_index
    }
}
