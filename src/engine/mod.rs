//! Segmented focus-timer engine
//! 
//! This module contains the countdown state machine that splits a focus
//! session into fixed-length segments. It has no timing or I/O dependency;
//! the host calls `tick()` once per wall-clock second.

pub mod config;
pub mod error;
pub mod observer;
pub mod state;
pub mod timer;

// Re-export main types
pub use config::TimerConfig;
pub use error::{Command, EngineError};
pub use observer::{NoopObserver, SessionObserver};
pub use state::{TimerState, TimerStatus};
pub use timer::{SegmentedTimerEngine, Tick};
