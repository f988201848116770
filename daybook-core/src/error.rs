//! Error types for daybook.
//!
//! Store operations never fail; only parsing dates and loading configuration do.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaybookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for daybook operations.
pub type DaybookResult<T> = Result<T, DaybookError>;
