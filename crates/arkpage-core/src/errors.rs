//! Error types for descriptor and config handling.

use thiserror::Error;

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Tab-bar mode with nothing to switch between.
    #[error("Tab-bar mode requires at least one tab entry, but the tab list is empty")]
    EmptyTabBar,

    /// Config text is not valid JSON for the expected shape.
    #[error("Invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
