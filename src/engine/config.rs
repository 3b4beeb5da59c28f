//! Timer configuration

use serde::Serialize;

use super::{EngineError, TimerState, TimerStatus};

/// Default segment length: 45 minutes
pub const DEFAULT_SEGMENT_SECONDS: u64 = 45 * 60;
/// Default number of segments: four 45-minute blocks make a 3-hour session
pub const DEFAULT_TOTAL_SEGMENTS: u32 = 4;

/// Immutable shape of a focus session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerConfig {
    segment_duration_seconds: u64,
    total_segments: u32,
}

impl TimerConfig {
    /// Create a validated configuration
    pub fn new(segment_duration_seconds: u64, total_segments: u32) -> Result<Self, EngineError> {
        if segment_duration_seconds == 0 {
            return Err(EngineError::InvalidConfig(
                "segment duration must be at least one second".to_string(),
            ));
        }
        if total_segments == 0 {
            return Err(EngineError::InvalidConfig(
                "a session needs at least one segment".to_string(),
            ));
        }
        if segment_duration_seconds
            .checked_mul(u64::from(total_segments))
            .is_none()
        {
            return Err(EngineError::InvalidConfig(format!(
                "{} segments of {}s overflow the session length",
                total_segments, segment_duration_seconds
            )));
        }

        Ok(Self {
            segment_duration_seconds,
            total_segments,
        })
    }

    /// Create a configuration from a segment length in minutes
    pub fn from_minutes(segment_minutes: u64, total_segments: u32) -> Result<Self, EngineError> {
        let seconds = segment_minutes.checked_mul(60).ok_or_else(|| {
            EngineError::InvalidConfig(format!("{} minutes is too long", segment_minutes))
        })?;
        Self::new(seconds, total_segments)
    }

    pub fn segment_duration_seconds(&self) -> u64 {
        self.segment_duration_seconds
    }

    pub fn total_segments(&self) -> u32 {
        self.total_segments
    }

    /// Full session length, the figure surfaced to the user
    pub fn total_session_seconds(&self) -> u64 {
        self.segment_duration_seconds * u64::from(self.total_segments)
    }

    /// Progress through the current segment, in percent
    pub fn segment_progress_percent(&self, state: &TimerState) -> f64 {
        let done = self
            .segment_duration_seconds
            .saturating_sub(state.remaining_in_segment_seconds);
        100.0 * done as f64 / self.segment_duration_seconds as f64
    }

    /// Progress through the whole session, in percent
    pub fn session_progress_percent(&self, state: &TimerState) -> f64 {
        if state.status == TimerStatus::Completed {
            return 100.0;
        }
        let segment_fraction = self.segment_progress_percent(state) / 100.0;
        100.0 * (f64::from(state.current_segment_index) + segment_fraction)
            / f64::from(self.total_segments)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            segment_duration_seconds: DEFAULT_SEGMENT_SECONDS,
            total_segments: DEFAULT_TOTAL_SEGMENTS,
        }
    }
}
