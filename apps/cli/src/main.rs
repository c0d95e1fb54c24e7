//! invtag CLI entry point.
//!
//! Annotates a tab-delimited inventory of hosts with status columns derived
//! from reference exports, one column per pipeline stage.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
