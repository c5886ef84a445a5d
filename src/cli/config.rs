//! Configuration commands: setcnf, getcnf

use drover_core::lifecycle::Controller;

use crate::cli::{CmdResult, Failure};

/// Store the daemon command line.
pub fn run_setcnf(ctl: &Controller, words: &[String]) -> CmdResult {
    ctl.set_command(words)?;
    println!("Configuration updated");
    Ok(())
}

/// Print the stored configuration verbatim.
pub fn run_getcnf(ctl: &Controller) -> CmdResult {
    match ctl.config_text() {
        Some(text) => {
            print!("{text}");
            Ok(())
        }
        None => {
            println!("No configuration file found");
            Err(Failure::Reported)
        }
    }
}
