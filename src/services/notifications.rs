//! User-facing messages for session milestones

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{TimerConfig, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Milestone,
    Completed,
    Cancelled,
}

/// Message the host surfaces to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    fn new(kind: NotificationKind, title: &str, message: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Build the message for a segment boundary
pub fn milestone_notification(milestone: u32, config: &TimerConfig) -> Notification {
    let segments = config.total_segments();
    let segment_minutes = config.segment_duration_seconds() / 60;
    let left = segments.saturating_sub(milestone);

    let (title, message) = if milestone == 1 && segments > 2 {
        (
            "First block done",
            format!("{} focused minutes in. {} blocks to go.", segment_minutes, left),
        )
    } else if u64::from(milestone) * 2 == u64::from(segments) {
        (
            "Halfway there",
            format!("{} of {} blocks finished. Keep the momentum.", milestone, segments),
        )
    } else if left == 1 {
        (
            "Final stretch",
            "One block left. Finish strong.".to_string(),
        )
    } else {
        (
            "Milestone reached",
            format!("Block {} of {} finished.", milestone, segments),
        )
    };

    Notification::new(NotificationKind::Milestone, title, message)
}

/// Build the message for a session that ran to the end
pub fn completion_notification(state: &TimerState) -> Notification {
    Notification::new(
        NotificationKind::Completed,
        "Session complete",
        format!(
            "You focused for {}. Great work.",
            format_duration(state.elapsed_total_seconds)
        ),
    )
}

/// Build the message for a session the user stopped early
pub fn cancellation_notification(state: &TimerState) -> Notification {
    Notification::new(
        NotificationKind::Cancelled,
        "Session ended early",
        format!(
            "{} focused across {} finished blocks.",
            format_duration(state.elapsed_total_seconds),
            state.milestones_reached
        ),
    )
}

/// Format seconds as a short human-readable duration
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
