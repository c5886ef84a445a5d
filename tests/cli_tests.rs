//! End-to-end tests driving the compiled binary with a scratch $HOME

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn drover(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_drover"))
        .args(args)
        .env("HOME", home.path())
        .output()
        .expect("failed to run drover binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn state_file(home: &TempDir, ext: &str) -> PathBuf {
    home.path().join("userrun").join(format!("drover.{ext}"))
}

#[test]
fn test_no_args_prints_help_and_succeeds() {
    let home = TempDir::new().unwrap();
    let out = drover(&home, &[]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Usage"));
    assert!(text.contains("Files:"));
    // The run directory is created on every invocation, even for help
    assert!(home.path().join("userrun").is_dir());
}

#[test]
fn test_unrecognized_command_prints_help_and_fails() {
    let home = TempDir::new().unwrap();
    let out = drover(&home, &["bogus"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("Usage"));
}

#[test]
fn test_status_with_fresh_home_is_stopped() {
    let home = TempDir::new().unwrap();
    let out = drover(&home, &["status"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "stopped\n");
}

#[test]
fn test_stop_without_daemon_is_noop() {
    let home = TempDir::new().unwrap();
    let out = drover(&home, &["stop"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "stopped\n");
}

#[test]
fn test_setcnf_getcnf_round_trip() {
    let home = TempDir::new().unwrap();
    let set = drover(&home, &["setcnf", "a", "b", "c"]);
    assert!(set.status.success());
    assert_eq!(stdout(&set), "Configuration updated\n");

    let get = drover(&home, &["getcnf"]);
    assert!(get.status.success());
    assert_eq!(stdout(&get), "a b c\n");
}

#[test]
fn test_setcnf_without_words_fails() {
    let home = TempDir::new().unwrap();
    let out = drover(&home, &["setcnf"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_getcnf_without_config() {
    let home = TempDir::new().unwrap();
    let out = drover(&home, &["getcnf"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "No configuration file found\n");
}

#[test]
fn test_run_without_config_fails_and_writes_no_pid() {
    let home = TempDir::new().unwrap();
    let out = drover(&home, &["run"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "Error: No configuration file found\n");
    assert!(!state_file(&home, "pid").exists());
}

#[test]
fn test_run_with_empty_config_fails() {
    let home = TempDir::new().unwrap();
    fs::create_dir_all(home.path().join("userrun")).unwrap();
    fs::write(state_file(&home, "cnf"), "\n").unwrap();

    let out = drover(&home, &["run"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "Error: Empty configuration file\n");
    assert!(!state_file(&home, "pid").exists());
}

#[test]
fn test_full_lifecycle_cycle() {
    let home = TempDir::new().unwrap();

    // Configure: write a banner to the log, then become a plain sleep
    let set = drover(&home, &["setcnf", "echo", "hello;", "exec", "sleep", "30"]);
    assert!(set.status.success());

    // Start and wait for confirmation
    let run = drover(&home, &["run"]);
    assert!(run.status.success());
    assert_eq!(stdout(&run), "running\n");

    // The PID file names a live process
    let pid_text = fs::read_to_string(state_file(&home, "pid")).unwrap();
    let pid: i32 = pid_text.trim().parse().unwrap();
    assert!(pid > 0);

    // Daemon stdout was captured in the log file
    let log = fs::read_to_string(state_file(&home, "log")).unwrap();
    assert!(log.contains("hello"));

    let status = drover(&home, &["status"]);
    assert_eq!(stdout(&status), "running\n");

    // A second run refuses and fails
    let again = drover(&home, &["run"]);
    assert_eq!(again.status.code(), Some(1));
    assert_eq!(stdout(&again), "running\n");

    // Reconfiguring a live daemon is refused and leaves the config alone
    let reconf = drover(&home, &["setcnf", "echo", "nope"]);
    assert_eq!(reconf.status.code(), Some(1));
    assert_eq!(
        stdout(&reconf),
        "Error: Stop daemon before changing configuration\n"
    );
    let get = drover(&home, &["getcnf"]);
    assert_eq!(stdout(&get), "echo hello; exec sleep 30\n");

    // Stop: graceful SIGINT is enough for sleep. Environments whose init
    // does not reap orphans leave a zombie behind, which the liveness
    // probe still sees until the escalation path runs; both confirmations
    // are valid here.
    let stop = drover(&home, &["stop"]);
    assert!(stop.status.success());
    let stop_text = stdout(&stop);
    assert!(stop_text == "stopped\n" || stop_text == "terminated\n");
    assert!(!state_file(&home, "pid").exists());

    let status = drover(&home, &["status"]);
    assert_eq!(stdout(&status), "stopped\n");
}
