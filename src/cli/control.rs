//! Lifecycle commands: status, run, stop

use drover_core::lifecycle::{Controller, RunOutcome, Status, StopOutcome};

use crate::cli::{CmdResult, Failure};

/// Report whether the tracked daemon is currently running.
pub fn run_status(ctl: &Controller) -> CmdResult {
    match ctl.status() {
        Status::Running => println!("running"),
        Status::Stopped => println!("stopped"),
    }
    Ok(())
}

/// Start the configured command as a detached daemon and wait for its pid
/// to be confirmed live.
pub fn run_run(ctl: &Controller) -> CmdResult {
    match ctl.run()? {
        RunOutcome::AlreadyRunning => {
            // Already running is reported like a status, but fails the call
            println!("running");
            Err(Failure::Reported)
        }
        RunOutcome::Running => {
            println!("running");
            Ok(())
        }
        RunOutcome::Stopped => {
            // Window expiry is a soft timeout, still exit 0
            println!("stopped");
            Ok(())
        }
    }
}

/// Stop the tracked daemon, escalating from SIGINT to SIGKILL.
pub fn run_stop(ctl: &Controller) -> CmdResult {
    match ctl.stop() {
        StopOutcome::Stopped => println!("stopped"),
        StopOutcome::Terminated => println!("terminated"),
    }
    Ok(())
}
