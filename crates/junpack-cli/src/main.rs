//! Junpack CLI - installs downloaded JDK archives into a destination
//! directory and converts packed jars.

mod cli;
mod command;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    command::execute(&cli, &*formatter)
}
