//! PID file management
//!
//! The PID file is the only persisted lifecycle state. Liveness is always
//! recomputed by probing the recorded pid with a null signal, never cached.

use std::fs;

use nix::sys::signal::kill;
use nix::unistd::Pid;
use tracing::warn;

use crate::paths::Paths;

/// Read the recorded pid, if any.
///
/// A missing file, an unreadable file, or content that does not parse as a
/// positive integer all mean "no recorded pid"; none of these fail the
/// caller.
pub fn read_pid(paths: &Paths) -> Option<Pid> {
    let content = fs::read_to_string(paths.pid_file()).ok()?;
    let pid: i32 = content.trim().parse().ok()?;
    (pid > 0).then(|| Pid::from_raw(pid))
}

/// Check whether `pid` refers to a live process we may signal.
///
/// Signal 0 probes for existence without delivering anything. Any error,
/// including EPERM, counts as not-confirmably-running.
pub fn is_running(pid: Pid) -> bool {
    kill(pid, None).is_ok()
}

/// Record `pid` as a bare decimal, overwriting any previous content.
/// Best-effort: a failure is logged and swallowed.
pub fn write_pid(paths: &Paths, pid: Pid) {
    if let Err(e) = fs::write(paths.pid_file(), pid.to_string()) {
        warn!(path = %paths.pid_file().display(), "failed to write PID file: {e}");
    }
}

/// Remove the PID file. Used only after a confirmed stop.
pub fn clear_pid(paths: &Paths) {
    let _ = fs::remove_file(paths.pid_file());
}
