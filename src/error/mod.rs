//! Error handling module for Splicer

use thiserror::Error;

/// Main error type for Splicer operations
#[derive(Error, Debug)]
pub enum SplicerError {
    /// The prober failed or returned data that could not be parsed
    #[error("Failed to probe media file {path}: {message}")]
    ProbeError { path: String, message: String },

    /// A caller violated a precondition
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// External tool could not be started
    #[error("{tool} could not be started: {message}")]
    ToolNotFound { tool: String, message: String },

    /// External tool ran but exited unsuccessfully
    #[error("{tool} failed ({status}): {stderr}")]
    ExecutionError {
        tool: String,
        status: String,
        stderr: String,
    },

    /// Download tool failure or unsupported URL
    #[error("Download failed for {url}: {message}")]
    DownloadError { url: String, message: String },

    /// Configuration file or value error
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SplicerError {
    /// Shorthand for an `InvalidArgument` error
    pub fn invalid(message: impl Into<String>) -> Self {
        SplicerError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Shorthand for a `ProbeError` on the given path
    pub fn probe(path: impl Into<String>, message: impl Into<String>) -> Self {
        SplicerError::ProbeError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for Splicer operations
pub type SplicerResult<T> = std::result::Result<T, SplicerError>;
