//! `flightlink ping` command - Check that the server accepts TCP connections.

use std::time::{Duration, Instant};

use tokio::net::TcpStream;

use crate::cli::PingArgs;
use crate::commands::resolve_target;
use crate::error::{CliError, CliResult};
use crate::output::{self, success};

/// Run the ping command
pub async fn run(args: PingArgs) -> CliResult<()> {
    let target = resolve_target(&args.connection)?;
    let config = target.resolve()?;
    let authority = config.authority();

    output::kv("Location", &config.location());

    let started = Instant::now();
    let connect = TcpStream::connect(authority.as_str());
    match tokio::time::timeout(Duration::from_secs(args.timeout), connect).await {
        Ok(Ok(_stream)) => {
            success(&format!(
                "Reachable: {} ({} ms)",
                authority,
                started.elapsed().as_millis()
            ));
            Ok(())
        }
        Ok(Err(e)) => Err(CliError::Unreachable(format!("{}: {}", authority, e))),
        Err(_) => Err(CliError::Unreachable(format!(
            "{}: timed out after {}s",
            authority, args.timeout
        ))),
    }
}
