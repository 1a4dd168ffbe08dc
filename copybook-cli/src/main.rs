//! Copybook CLI
//!
//! Renders handwriting practice sheets to PNG, manages stroke indexes, and
//! dumps display lists for debugging.

mod args;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;

use args::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Warnings by default; each `-v` raises the level. `RUST_LOG` wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Render {
            sheet,
            store,
            output,
            scale,
            prefix,
        } => commands::render(&sheet, &store, &output, scale, &prefix),
        Command::Import { source, index } => commands::import(&source, &index),
        Command::Lookup { store, characters } => commands::lookup(&store, &characters),
        Command::Dump {
            sheet,
            store,
            pretty,
            output,
        } => commands::dump(&sheet, &store, pretty, output.as_deref()),
    }
}
