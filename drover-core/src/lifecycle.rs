//! Lifecycle orchestration: status, run, stop, configure
//!
//! State is never persisted beyond the PID file; every operation recomputes
//! it by liveness-probing the recorded pid.

use std::thread;
use std::time::Duration;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::debug;

use crate::config;
use crate::daemon;
use crate::error::{ConfigError, DroverError};
use crate::paths::Paths;
use crate::pidfile;

/// Polling iterations for start confirmation and graceful stop.
pub const POLL_ATTEMPTS: u32 = 10;

/// Delay between polling iterations.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Externally observable daemon state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Stopped,
}

/// Result of a `run` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A live daemon was already recorded; nothing was started.
    AlreadyRunning,
    /// The new daemon was confirmed live within the polling window.
    Running,
    /// The polling window expired without confirmation. A soft timeout,
    /// not an operation error: the daemon may still come up late, or may
    /// have died before recording its pid.
    Stopped,
}

/// Result of a `stop` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The daemon was not running, or exited within the graceful window.
    Stopped,
    /// The daemon ignored the graceful signal and was killed.
    Terminated,
}

/// Orchestrates one daemon identity.
///
/// The polling knobs exist so tests can run the bounded windows at
/// millisecond cadence; production callers use [`Controller::new`] and get
/// the 1-second, 10-attempt defaults.
pub struct Controller {
    paths: Paths,
    attempts: u32,
    interval: Duration,
}

impl Controller {
    pub fn new(paths: Paths) -> Self {
        Self::with_polling(paths, POLL_ATTEMPTS, POLL_INTERVAL)
    }

    pub fn with_polling(paths: Paths, attempts: u32, interval: Duration) -> Self {
        Self {
            paths,
            attempts,
            interval,
        }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// The recorded pid, if it refers to a live process.
    fn live_pid(&self) -> Option<Pid> {
        pidfile::read_pid(&self.paths).filter(|&pid| pidfile::is_running(pid))
    }

    /// Report whether the recorded daemon is alive. Always succeeds.
    pub fn status(&self) -> Status {
        match self.live_pid() {
            Some(_) => Status::Running,
            None => Status::Stopped,
        }
    }

    /// Start the configured command as a daemon and wait for confirmation.
    pub fn run(&self) -> Result<RunOutcome, DroverError> {
        if self.live_pid().is_some() {
            return Ok(RunOutcome::AlreadyRunning);
        }

        let command = config::read_command(&self.paths)?;
        debug!(command = %command, "starting daemon");
        daemon::spawn(&self.paths, &command)?;

        // The daemon records its pid before exec'ing the command; poll the
        // PID file until it shows up live or the window expires.
        for _ in 0..self.attempts {
            thread::sleep(self.interval);
            if self.live_pid().is_some() {
                return Ok(RunOutcome::Running);
            }
        }
        Ok(RunOutcome::Stopped)
    }

    /// Stop the recorded daemon: SIGINT, graceful window, then SIGKILL.
    ///
    /// Both outcomes are success; the PID file is cleared only here, once
    /// the stop is confirmed or forced.
    pub fn stop(&self) -> StopOutcome {
        let Some(pid) = self.live_pid() else {
            return StopOutcome::Stopped;
        };

        let _ = kill(pid, Signal::SIGINT);
        for _ in 0..self.attempts {
            thread::sleep(self.interval);
            if !pidfile::is_running(pid) {
                pidfile::clear_pid(&self.paths);
                return StopOutcome::Stopped;
            }
        }

        debug!(pid = %pid, "graceful window expired, escalating to SIGKILL");
        let _ = kill(pid, Signal::SIGKILL);
        thread::sleep(self.interval);
        pidfile::clear_pid(&self.paths);
        StopOutcome::Terminated
    }

    /// Replace the configured command. Refused while a recorded daemon is
    /// live, so a running instance is never reconfigured under itself.
    pub fn set_command(&self, words: &[String]) -> Result<(), DroverError> {
        if self.live_pid().is_some() {
            return Err(ConfigError::ActiveDaemon.into());
        }
        config::write_command(&self.paths, words)?;
        Ok(())
    }

    /// Raw config file contents for display.
    pub fn config_text(&self) -> Option<String> {
        config::read_raw(&self.paths)
    }
}
