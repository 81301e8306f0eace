//! `flightlink version` command - Display version information.

use flightlink_conn::{FlightScheme, FlightSqlDriver};

use crate::error::CliResult;
use crate::output::{self, kv};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the version command
pub async fn run() -> CliResult<()> {
    output::header("Flightlink");

    kv("Version", VERSION);
    kv("Binary", NAME);

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    kv("Build", build_mode);

    output::newline();

    let driver = FlightSqlDriver::new();
    output::section("Driver");
    kv("Name", driver.name());
    kv("Version", driver.version());
    let schemes: Vec<_> = FlightScheme::ALL.iter().map(|s| s.prefix()).collect();
    kv("Schemes", &schemes.join(", "));

    output::newline();
    output::dim("https://arrow.apache.org/docs/format/FlightSql.html");

    Ok(())
}
