//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Flightlink CLI - Inspect Arrow Flight SQL connection URLs
#[derive(Parser, Debug)]
#[command(name = "flightlink")]
#[command(version)]
#[command(about = "Flightlink CLI - Inspect Arrow Flight SQL connection URLs", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a connection URL and show its arguments and resolved settings
    Parse(ParseArgs),

    /// Validate a connection URL and its properties
    Check(CheckArgs),

    /// Open a TCP connection to the server named by a URL
    Ping(PingArgs),

    /// Display version information
    Version,
}

/// Where the URL and its properties come from
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Connection URL (defaults to the profile URL, then FLIGHT_SQL_URL)
    pub url: Option<String>,

    /// Connection property, may be repeated
    #[arg(short = 'p', long = "property", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub properties: Vec<(String, String)>,

    /// Profile to read from the config file
    #[arg(long)]
    pub profile: Option<String>,

    /// Path to the config file (defaults to ./flightlink.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

// =============================================================================
// Parse Command
// =============================================================================

/// Arguments for the `parse` command
#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

// =============================================================================
// Check Command
// =============================================================================

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

// =============================================================================
// Ping Command
// =============================================================================

/// Arguments for the `ping` command
#[derive(Args, Debug)]
pub struct PingArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Connect timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}
