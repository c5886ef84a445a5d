//! drover - per-user daemon supervisor
//!
//! Manages a single detached daemon per (user, program-name) identity:
//! configure a shell command once, then run/status/stop it by PID file.

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use tracing::debug;

use drover_core::error::{ConfigError, DroverError};
use drover_core::lifecycle::Controller;
use drover_core::paths::Paths;

mod cli;

use cli::Failure;

#[derive(Parser)]
#[command(name = "drover")]
#[command(about = "Per-user daemon supervisor: run one configured shell command detached")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if daemon is running
    Status,
    /// Stop running daemon
    Stop,
    /// Start daemon using configuration
    Run,
    /// Set daemon configuration
    Setcnf {
        /// Command and arguments the daemon will execute
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Show current configuration
    Getcnf,
}

fn main() {
    // Initialize logging
    if let Err(e) = drover_core::init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    // Path resolution happens before any subcommand logic: a missing HOME
    // or an uncreatable run directory aborts immediately.
    let paths = match Paths::from_env() {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut command = Cli::command().after_help(files_help(&paths));
    let matches = match command.try_get_matches_from_mut(std::env::args_os()) {
        Ok(matches) => matches,
        Err(e) => handle_parse_error(&mut command, e),
    };
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let Some(subcommand) = cli.command else {
        let _ = command.print_help();
        std::process::exit(0);
    };

    debug!(program = paths.program(), "dispatching subcommand");
    let ctl = Controller::new(paths);
    let result = match subcommand {
        Commands::Status => cli::control::run_status(&ctl),
        Commands::Stop => cli::control::run_stop(&ctl),
        Commands::Run => cli::control::run_run(&ctl),
        Commands::Setcnf { words } => cli::config::run_setcnf(&ctl, &words),
        Commands::Getcnf => cli::config::run_getcnf(&ctl),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(Failure::Reported) => std::process::exit(1),
        Err(Failure::Error(e)) => {
            report_error(&e);
            std::process::exit(1);
        }
    }
}

/// User/state errors go to stdout as one-line messages; environment and
/// I/O diagnostics go to stderr.
fn report_error(e: &DroverError) {
    match e {
        DroverError::Config(err) => match err {
            ConfigError::WriteFailed { .. } => eprintln!("Error: {}", err),
            _ => println!("Error: {}", err),
        },
        _ => eprintln!("Error: {}", e),
    }
}

fn handle_parse_error(command: &mut clap::Command, err: clap::Error) -> ! {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            std::process::exit(0)
        }
        // Unknown subcommands show the help screen and fail
        ErrorKind::InvalidSubcommand => {
            let _ = command.print_help();
            std::process::exit(1)
        }
        _ => {
            let _ = err.print();
            std::process::exit(1)
        }
    }
}

fn files_help(paths: &Paths) -> String {
    format!(
        "Files:\n  PID file: {}\n  Config file: {}\n  Log file: {}",
        paths.pid_file().display(),
        paths.cnf_file().display(),
        paths.log_file().display()
    )
}
