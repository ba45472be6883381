//! Error types for script file operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing the script file.
///
/// The in-memory script is never touched when one of these is returned, so
/// callers can surface the error and carry on with the previous state.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Save was requested but the script has no backing file yet.
    #[error("no file associated with the script")]
    NoPath,
}
