use std::path::PathBuf;

use thiserror::Error;

/// Batchscribe's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Batchscribe's crate-wide error type.
///
/// These are the *fatal* failures: anything that aborts the whole run.
/// Per-segment failures are not errors. They are `TranscriptionOutcome`
/// values and the pipeline continues past them.
#[derive(Debug, Error)]
pub enum Error {
    /// The run configuration could not be loaded or was invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The input audio directory does not exist.
    #[error("audio directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The bearer credential environment variable is missing or blank.
    #[error("environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
