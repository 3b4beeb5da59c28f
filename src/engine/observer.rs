//! Callbacks from the engine to its host

use super::TimerState;

/// Receives every state change the engine reports
///
/// All methods default to doing nothing, so hosts only implement the
/// callbacks they care about. Callbacks run synchronously inside the engine
/// call that triggered them and always see the post-transition state.
pub trait SessionObserver {
    /// Fired on every tick that stays inside the current segment
    fn on_progress(&mut self, _segment_progress_percent: f64, _state: &TimerState) {}

    /// Fired once per segment boundary crossed while more segments remain
    fn on_milestone_reached(&mut self, _milestone: u32, _state: &TimerState) {}

    /// Fired exactly once when the last segment runs out
    fn on_completed(&mut self, _final_state: &TimerState) {}

    /// Fired exactly once when the host cancels the session
    fn on_cancelled(&mut self, _state: &TimerState) {}
}

/// Observer that ignores every callback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
