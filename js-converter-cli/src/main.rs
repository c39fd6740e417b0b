use clap::Parser;
use js_converter_core::Config;
use std::process;
use tracing::{warn, Level};

mod cli;
mod convert;

use cli::{Cli, OutputFormat};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config to get defaults
    let config = Config::load().unwrap_or_else(|e| {
        warn!("ignoring config: {e:#}");
        Config::default()
    });

    match convert::handle_convert(cli, &config) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        },
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
