//! imla CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::error;

use imla::cli::args::ImlaArgs;
use imla::cli::commands::{execute_command, exit_code, log_level};

fn main() {
    let args = ImlaArgs::parse();

    // -v/-q pick the level; IMLA_LOG can still refine it per module.
    Builder::new()
        .filter_level(log_level(args.verbosity()))
        .parse_env("IMLA_LOG")
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        if e.is_unavailable() {
            error!("No dictionary could be loaded; check --dictionary or IMLA_DICTIONARY");
        }
        eprintln!("Error: {e}");
        process::exit(exit_code(&e));
    }
}
