//! State management module
//! 
//! This module contains the host-side owner of the live session and the
//! events it publishes.

pub mod app_state;
pub mod error;
pub mod events;

// Re-export main types
pub use app_state::{ActiveSession, AppState};
pub use error::SessionError;
pub use events::{ChannelObserver, SessionEvent};
