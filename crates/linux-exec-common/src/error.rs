//! Unified error type for the linux-exec workspace.
//!
//! Every failure is fatal to the invocation: nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum LinuxExecError {
    /// The engine could not be reached or its image listing failed.
    #[error("container engine query failed ({engine}): {reason}")]
    EngineQuery {
        /// Engine executable that was invoked.
        engine: String,
        /// What went wrong.
        reason: String,
    },

    /// The image build was rejected or the build process failed.
    #[error("failed to build image {image}: {reason}")]
    Build {
        /// `repository:tag` that was being built.
        image: String,
        /// What went wrong.
        reason: String,
    },

    /// The container could not be started.
    #[error("failed to run container from {image}: {reason}")]
    Run {
        /// `repository:tag` the container was launched from.
        image: String,
        /// What went wrong.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path (or stream name) where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, LinuxExecError>;
