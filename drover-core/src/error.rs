//! Error types for the drover supervisor
//!
//! A top-level error aggregates the per-domain enums. Display strings for
//! the configuration variants are the exact one-line messages the CLI shows
//! for user-correctable states.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the drover application
#[derive(Error, Debug)]
pub enum DroverError {
    /// Fatal environment problems, detected before any subcommand runs
    #[error("{0}")]
    Env(#[from] EnvError),

    /// User-correctable configuration state
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Process-control failures on the supervisor side of the fork
    #[error("{0}")]
    Daemon(#[from] DaemonError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Environment-related errors
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("HOME environment variable not set")]
    HomeNotSet,

    #[error("failed to create run directory {}: {source}", path.display())]
    RunDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No configuration file found")]
    NotFound,

    #[error("Empty configuration file")]
    Empty,

    #[error("Stop daemon before changing configuration")]
    ActiveDaemon,

    #[error("failed to open config file for writing: {source}")]
    WriteFailed { source: std::io::Error },
}

/// Daemonization errors visible to the original caller
#[derive(Error, Debug)]
pub enum DaemonError {
    #[error("fork failed: {0}")]
    Fork(nix::errno::Errno),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DroverError>;
