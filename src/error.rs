//! Error handling module
//!
//! Unified error types for the comparison run. Input errors are fatal and
//! unrecovered: a malformed venue file means the upstream producer broke,
//! and recovering silently would hide exactly the data-quality regressions
//! this tool exists to catch.

use std::path::PathBuf;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Release directory not found or unreadable: {}: {}", .path.display(), .source)]
    ReleaseDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read venue file {}: {}", .path.display(), .source)]
    VenueRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed venue file {}: {}", .path.display(), .source)]
    VenueParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode comparison artifact: {0}")]
    ArtifactEncode(serde_json::Error),

    #[error("Failed to write comparison artifact {}: {}", .path.display(), .source)]
    ArtifactWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for the engine
pub type AppResult<T> = Result<T, AppError>;
