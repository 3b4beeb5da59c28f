//! Errors raised while routing host commands to the engine

use thiserror::Error;

use crate::engine::{EngineError, TimerStatus};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no focus session has been started")]
    NoSession,

    #[error("a focus session is already {0}")]
    AlreadyActive(TimerStatus),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("failed to lock session state: {0}")]
    Lock(String),
}
