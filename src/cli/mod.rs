//! CLI command implementations
//!
//! This module contains the implementation of all CLI subcommands.

pub mod config;
pub mod control;

use drover_core::error::DroverError;

/// How a subcommand failed.
pub enum Failure {
    /// The outcome was already reported on stdout; exit non-zero quietly.
    Reported,
    /// An error for `main` to report per its output taxonomy.
    Error(DroverError),
}

impl From<DroverError> for Failure {
    fn from(err: DroverError) -> Self {
        Failure::Error(err)
    }
}

pub type CmdResult = Result<(), Failure>;
