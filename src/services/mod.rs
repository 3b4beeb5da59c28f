//! Session collaborators module
//! 
//! This module contains the persistence and notification collaborators the
//! host invokes when a session reaches a milestone or ends.

pub mod history;
pub mod notifications;

// Re-export main types and functions
pub use history::*;
pub use notifications::*;
