//! Double-fork daemonization
//!
//! Turns the calling process into a fully detached background process
//! running a shell command, with stdio redirected to the log file and the
//! daemon's pid recorded before the command executes.

use std::ffi::CString;
use std::fs::OpenOptions;
use std::os::fd::{AsRawFd, IntoRawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use nix::unistd::{execv, fork, getpid, setsid, ForkResult};

use crate::error::DaemonError;
use crate::paths::Paths;
use crate::pidfile;

/// Fork off a detached daemon running `command` under `/bin/sh -c`.
///
/// Returns in the parent once the first fork has succeeded; the caller is
/// expected to poll the PID file for start confirmation. The child never
/// returns from this call: it either replaces its process image with the
/// shell or exits. The process must be single-threaded when this is called.
pub fn spawn(paths: &Paths, command: &str) -> Result<(), DaemonError> {
    match unsafe { fork() } {
        Ok(ForkResult::Parent { .. }) => Ok(()),
        Ok(ForkResult::Child) => detach_and_exec(paths, command),
        Err(errno) => Err(DaemonError::Fork(errno)),
    }
}

/// Runs in the first-fork child; never returns.
fn detach_and_exec(paths: &Paths, command: &str) -> ! {
    // New session: drop the controlling terminal, become session and
    // process-group leader.
    let _ = setsid();

    // Second fork so the daemon is not a session leader and can never
    // re-acquire a controlling terminal.
    match unsafe { fork() } {
        Ok(ForkResult::Parent { .. }) => unsafe { libc::_exit(0) },
        Ok(ForkResult::Child) => {}
        Err(_) => unsafe { libc::_exit(1) },
    }

    // Keep the caller's working directory so relative paths in the command
    // still resolve; fall back to $HOME, then /.
    reapply_working_dir();

    close_all_descriptors();

    if redirect_stdio(paths.log_file()).is_err() {
        // No log sink could be established, so there is nowhere to report
        // anything: die silently. The supervisor observes this as the pid
        // never becoming live.
        unsafe { libc::_exit(1) }
    }

    // Record the pid before exec; this opens the window the supervisor
    // polls against. A write failure lands in the daemon log via stderr.
    pidfile::write_pid(paths, getpid());

    exec_shell(command)
}

fn reapply_working_dir() {
    let cwd = std::env::current_dir()
        .ok()
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("/"));
    let _ = std::env::set_current_dir(cwd);
}

/// Close every descriptor up to the open-file limit. Descriptor ownership
/// ends here; nothing inherited from the caller survives.
fn close_all_descriptors() {
    let max = unsafe { libc::sysconf(libc::_SC_OPEN_MAX) };
    let max = if max < 0 { 1024 } else { max as i32 };
    for fd in 0..max {
        unsafe { libc::close(fd) };
    }
}

/// Point fds 1 and 2 at the log file (append/create, mode 0644) and fd 0 at
/// the null device. Must run right after the descriptor table is emptied.
fn redirect_stdio(log_file: &Path) -> std::io::Result<()> {
    let log = OpenOptions::new()
        .append(true)
        .create(true)
        .mode(0o644)
        .open(log_file)?;
    let log_fd = log.as_raw_fd();
    unsafe {
        libc::dup2(log_fd, libc::STDOUT_FILENO);
        libc::dup2(log_fd, libc::STDERR_FILENO);
    }
    drop(log);

    // Stdin from the null device; a failure here just leaves fd 0 closed.
    if let Ok(null) = std::fs::File::open("/dev/null") {
        let null_fd = null.into_raw_fd();
        if null_fd != libc::STDIN_FILENO {
            unsafe {
                libc::dup2(null_fd, libc::STDIN_FILENO);
                libc::close(null_fd);
            }
        }
    }
    Ok(())
}

/// Replace this process with `/bin/sh -c <command>`. Only reachable past
/// the exec if it failed, in which case the daemon exits with failure.
fn exec_shell(command: &str) -> ! {
    if let (Ok(sh), Ok(arg0), Ok(flag), Ok(cmd)) = (
        CString::new("/bin/sh"),
        CString::new("sh"),
        CString::new("-c"),
        CString::new(command),
    ) {
        let _ = execv(&sh, &[arg0.as_c_str(), flag.as_c_str(), cmd.as_c_str()]);
    }
    unsafe { libc::_exit(1) }
}
