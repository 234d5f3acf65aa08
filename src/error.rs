//! Library error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised before any command is built or run.
///
/// Execution failures of the accounting command itself are not errors: they
/// are logged and reported through [`RunOutcome`](crate::core::runner::RunOutcome).
#[derive(Debug, Error)]
pub enum Error {
    /// A single date component is out of range.
    #[error("invalid {field}: {value} ({reason})")]
    InvalidDate {
        field: &'static str,
        value: u32,
        reason: &'static str,
    },

    /// The start date falls after the end date.
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: String, end: String },

    /// The configuration file could not be parsed.
    #[error("invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Filesystem or output failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
