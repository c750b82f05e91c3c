//! Error types for the runtime model.

use crate::lifecycle::{LifecycleEvent, LifecycleState};
use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors surfaced by [`PageHost`](crate::PageHost).
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A lifecycle event arrived in a state that does not accept it.
    #[error("cannot {event} a page that is {from}")]
    InvalidTransition {
        from: LifecycleState,
        event: LifecycleEvent,
    },

    /// The tab-bar app has no tabs.
    #[error(transparent)]
    Config(#[from] arkpage_core::ConfigError),
}

/// The host window refused or could not provide full-screen mode.
///
/// Never returned from the lifecycle; the host logs and drops it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("window unavailable: {reason}")]
pub struct WindowError {
    pub reason: String,
}

impl WindowError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
