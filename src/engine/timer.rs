//! Segmented countdown state machine

use tracing::{debug, info};

use super::{
    Command, EngineError, NoopObserver, SessionObserver, TimerConfig, TimerState, TimerStatus,
};

/// Outcome of a single `tick()`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// The session was not running, nothing changed
    Inert,
    /// One second counted down inside the current segment
    Progress { segment_progress_percent: f64 },
    /// A segment finished and the next one started
    Milestone { milestone: u32 },
    /// The final segment finished
    Completed,
}

/// Countdown engine for a session made of fixed-length segments
///
/// The engine owns its state exclusively. Hosts read copies through
/// `snapshot()` or receive them through the observer callbacks.
#[derive(Debug)]
pub struct SegmentedTimerEngine<O = NoopObserver> {
    config: TimerConfig,
    state: TimerState,
    observer: O,
}

impl<O: SessionObserver> SegmentedTimerEngine<O> {
    /// Create an idle engine
    pub fn new(config: TimerConfig, observer: O) -> Self {
        Self {
            config,
            state: TimerState::idle(&config),
            observer,
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn status(&self) -> TimerStatus {
        self.state.status
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> TimerState {
        self.state.clone()
    }

    /// Begin the countdown of the first segment
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.transition(Command::Start, TimerStatus::Idle, TimerStatus::Running)?;
        info!(
            "Focus session started: {} segments of {}s",
            self.config.total_segments(),
            self.config.segment_duration_seconds()
        );
        Ok(())
    }

    /// Freeze the countdown
    pub fn pause(&mut self) -> Result<(), EngineError> {
        self.transition(Command::Pause, TimerStatus::Running, TimerStatus::Paused)?;
        debug!(
            "Session paused with {}s left in segment {}",
            self.state.remaining_in_segment_seconds, self.state.current_segment_index
        );
        Ok(())
    }

    /// Continue from the frozen countdown
    pub fn resume(&mut self) -> Result<(), EngineError> {
        self.transition(Command::Resume, TimerStatus::Paused, TimerStatus::Running)?;
        debug!("Session resumed");
        Ok(())
    }

    /// Stop the session for good
    pub fn cancel(&mut self) -> Result<(), EngineError> {
        match self.state.status {
            TimerStatus::Running | TimerStatus::Paused => {
                self.state.status = TimerStatus::Cancelled;
                info!(
                    "Focus session cancelled after {}s",
                    self.state.elapsed_total_seconds
                );
                self.observer.on_cancelled(&self.state);
                Ok(())
            }
            status => Err(EngineError::invalid_state(Command::Cancel, status)),
        }
    }

    /// Advance the countdown by one second
    ///
    /// A boundary reached by this tick is fully processed before returning,
    /// so a pause or cancel issued afterwards never loses a milestone or a
    /// completion.
    pub fn tick(&mut self) -> Tick {
        if self.state.status != TimerStatus::Running {
            return Tick::Inert;
        }

        self.state.remaining_in_segment_seconds -= 1;
        self.state.elapsed_total_seconds += 1;

        let outcome = if self.state.remaining_in_segment_seconds > 0 {
            let percent = self.config.segment_progress_percent(&self.state);
            self.observer.on_progress(percent, &self.state);
            Tick::Progress {
                segment_progress_percent: percent,
            }
        } else if self.state.current_segment_index + 1 < self.config.total_segments() {
            self.state.milestones_reached += 1;
            self.state.current_segment_index += 1;
            self.state.remaining_in_segment_seconds = self.config.segment_duration_seconds();

            let milestone = self.state.milestones_reached;
            info!(
                "Milestone {} of {} reached",
                milestone,
                self.config.total_segments() - 1
            );
            self.observer.on_milestone_reached(milestone, &self.state);
            Tick::Milestone { milestone }
        } else {
            self.state.status = TimerStatus::Completed;
            info!(
                "Focus session completed: {}s focused",
                self.state.elapsed_total_seconds
            );
            self.observer.on_completed(&self.state);
            Tick::Completed
        };

        debug_assert!(self.state.is_consistent_with(&self.config));
        outcome
    }

    fn transition(
        &mut self,
        command: Command,
        from: TimerStatus,
        to: TimerStatus,
    ) -> Result<(), EngineError> {
        if self.state.status != from {
            debug!("Rejected {} while {}", command, self.state.status);
            return Err(EngineError::invalid_state(command, self.state.status));
        }
        self.state.status = to;
        Ok(())
    }
}
