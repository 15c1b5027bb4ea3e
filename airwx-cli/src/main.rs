//! Binary crate for the `airwx` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Interactive prompts and printing rendered output

use clap::Parser;

mod cli;
mod commands;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.debug, cmd.log.as_deref())?;
    cmd.run().await
}
