//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod session_reporter;
pub mod session_timer;

// Re-export main functions
pub use session_reporter::{handle_session_event, session_reporter_task};
pub use session_timer::session_timer_task;
