//! `flightlink check` command - Validate a connection URL.

use crate::cli::CheckArgs;
use crate::commands::resolve_target;
use crate::error::{CliError, CliResult};
use crate::output::{self, success, warn};

/// Run the check command
pub async fn run(args: CheckArgs) -> CliResult<()> {
    output::header("Check URL");

    output::section("Resolving");
    let target = resolve_target(&args.connection)?;
    let config = target.resolve()?;
    output::kv("Location", &config.location());
    output::kv("Auth", config.auth().method());
    output::newline();

    let warnings = config.warnings();
    if warnings.is_empty() {
        success("Connection URL is valid");
        return Ok(());
    }

    for warning in warnings {
        warn(warning);
    }
    output::newline();

    if args.strict {
        return Err(CliError::Validation(format!(
            "{} warning(s) reported in strict mode",
            warnings.len()
        )));
    }

    success("Connection URL is valid with warnings");
    Ok(())
}
