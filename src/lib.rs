//! Focus Session - A segmented focus-session timer served over HTTP
//! 
//! This library provides the segmented countdown engine and the host that
//! drives it: tick scheduling, session history and milestone notifications.

pub mod api;
pub mod config;
pub mod engine;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use engine::{SegmentedTimerEngine, SessionObserver, TimerConfig, TimerState, TimerStatus};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
