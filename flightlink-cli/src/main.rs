//! Flightlink CLI - Command-line interface for Arrow Flight SQL connection URLs.

use clap::Parser;
use miette::Diagnostic;

use flightlink_cli::cli::{Cli, Command};
use flightlink_cli::commands;
use flightlink_cli::error::CliResult;
use flightlink_cli::output;

#[tokio::main]
async fn main() {
    flightlink_conn::logging::init();

    if let Err(e) = run().await {
        output::error(&e.to_string());
        if let Some(help) = e.help() {
            output::hint(&help.to_string());
        }
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse(args) => commands::parse::run(args).await,
        Command::Check(args) => commands::check::run(args).await,
        Command::Ping(args) => commands::ping::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
