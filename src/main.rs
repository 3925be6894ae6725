//! Glaive CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use glaive::cli::args::GlaiveArgs;
use glaive::cli::commands::execute_command;

fn main() {
    // Parse command line arguments using clap
    let args = GlaiveArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace, // Per-candidate fuzzy matches (4+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
