//! Daemon identity and file path resolution
//!
//! All state files live under `$HOME/userrun`, named after the invoking
//! executable's basename. Two invocations sharing a basename and home
//! directory intentionally address the same daemon.

use std::fs::DirBuilder;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use crate::error::EnvError;

/// Fixed per-user state directory under `$HOME`.
pub const RUN_SUBDIR: &str = "userrun";

/// The resolved file layout for one daemon identity.
///
/// Constructed once at startup and passed to every operation; all four
/// paths are deterministic functions of the home directory and the
/// program name.
#[derive(Debug, Clone)]
pub struct Paths {
    run_dir: PathBuf,
    program: String,
    pid_file: PathBuf,
    cnf_file: PathBuf,
    log_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `$HOME` and the invoking executable's basename,
    /// creating the run directory if it does not exist yet.
    pub fn from_env() -> Result<Self, EnvError> {
        let home = std::env::var_os("HOME").ok_or(EnvError::HomeNotSet)?;
        Self::with_home(Path::new(&home), &invoked_as())
    }

    /// Same derivation from explicit inputs. Tests use this to point a
    /// daemon identity at a scratch directory.
    pub fn with_home(home: &Path, program: &str) -> Result<Self, EnvError> {
        let run_dir = home.join(RUN_SUBDIR);
        ensure_run_dir(&run_dir)?;
        Ok(Self {
            pid_file: run_dir.join(format!("{program}.pid")),
            cnf_file: run_dir.join(format!("{program}.cnf")),
            log_file: run_dir.join(format!("{program}.log")),
            program: program.to_string(),
            run_dir,
        })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn pid_file(&self) -> &Path {
        &self.pid_file
    }

    pub fn cnf_file(&self) -> &Path {
        &self.cnf_file
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

fn ensure_run_dir(run_dir: &Path) -> Result<(), EnvError> {
    match DirBuilder::new().mode(0o755).create(run_dir) {
        Ok(()) => Ok(()),
        Err(_) if run_dir.is_dir() => Ok(()),
        Err(source) => Err(EnvError::RunDir {
            path: run_dir.to_path_buf(),
            source,
        }),
    }
}

/// Basename of argv[0]. Running the binary under a different name (symlink,
/// rename) yields a separate daemon identity.
fn invoked_as() -> String {
    std::env::args_os()
        .next()
        .map(PathBuf::from)
        .and_then(|arg0| {
            arg0.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "drover".to_string())
}
