//! Error types for the nag core library.

use thiserror::Error;

/// Core error types for task operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no task at position {index} (list has {count} task(s))")]
    Selection { index: usize, count: usize },

    #[error("task description cannot be empty")]
    EmptyDescription,

    #[error("no task descriptions provided")]
    EmptyInput,

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is a user mistake (bad selection or blank input)
    /// rather than a system failure. User errors are reported as warnings
    /// and never abort the surface.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::Selection { .. } | Error::EmptyDescription | Error::EmptyInput
        )
    }
}

/// Result type alias using the nag Error type.
pub type Result<T> = std::result::Result<T, Error>;
