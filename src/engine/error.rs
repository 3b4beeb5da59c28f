//! Engine error types

use std::fmt;

use thiserror::Error;

use super::TimerStatus;

/// Commands the host can issue to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Cancel,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// Errors produced by the timer engine
///
/// Every command issued from the wrong status is rejected with
/// `InvalidState` and leaves the timer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cannot {command} a session that is {status}")]
    InvalidState { command: Command, status: TimerStatus },

    #[error("invalid timer configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub(crate) fn invalid_state(command: Command, status: TimerStatus) -> Self {
        Self::InvalidState { command, status }
    }
}
