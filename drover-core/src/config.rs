//! Config file I/O
//!
//! The config file holds exactly one line: the shell command the daemon
//! runs. Absence is the normal "unconfigured" state, not an I/O failure.

use std::fs;

use crate::error::ConfigError;
use crate::paths::Paths;

/// Join `words` with single spaces and store them as the configured
/// command, one line plus trailing newline, truncating previous content.
pub fn write_command(paths: &Paths, words: &[String]) -> Result<(), ConfigError> {
    let line = format!("{}\n", words.join(" "));
    fs::write(paths.cnf_file(), line).map_err(|source| ConfigError::WriteFailed { source })
}

/// Raw file contents for display, or `None` if the file is absent or
/// unreadable. Not a semantic parse.
pub fn read_raw(paths: &Paths) -> Option<String> {
    fs::read_to_string(paths.cnf_file()).ok()
}

/// The command line to execute: first line of the config file, trimmed.
pub fn read_command(paths: &Paths) -> Result<String, ConfigError> {
    let content = fs::read_to_string(paths.cnf_file()).map_err(|_| ConfigError::NotFound)?;
    let command = content.lines().next().unwrap_or("").trim();
    if command.is_empty() {
        return Err(ConfigError::Empty);
    }
    Ok(command.to_string())
}
