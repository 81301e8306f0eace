//! CLI command implementations.

pub mod check;
pub mod parse;
pub mod ping;
pub mod version;

use flightlink_conn::connection::DEFAULT_URL_ENV;
use flightlink_conn::{FlightConnectionConfig, FlightSqlDriver, Properties, UrlArgs, parse_url_args};

use crate::cli::ConnectionArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};

/// A URL with the properties to resolve it against.
#[derive(Debug, Clone)]
pub struct Target {
    /// Connection URL
    pub url: String,
    /// Profile properties overlaid with `-p` flags
    pub properties: Properties,
}

impl Target {
    /// Parse the URL, failing when another driver owns its scheme.
    pub fn parse(&self) -> CliResult<UrlArgs> {
        parse_url_args(&self.url)?.ok_or_else(|| CliError::unsupported_url(&self.url))
    }

    /// Resolve the full connection configuration.
    pub fn resolve(&self) -> CliResult<FlightConnectionConfig> {
        FlightSqlDriver::new()
            .connect(&self.url, &self.properties)?
            .ok_or_else(|| CliError::unsupported_url(&self.url))
    }
}

/// Work out the URL and properties from arguments, profile and environment.
///
/// The URL comes from the command line, then the profile, then
/// `FLIGHT_SQL_URL`. Flags override profile properties.
pub fn resolve_target(args: &ConnectionArgs) -> CliResult<Target> {
    let config = Config::discover(args.config.as_deref())?;
    let profile = config.profile(args.profile.as_deref())?;

    let url = args
        .url
        .clone()
        .or_else(|| profile.and_then(|p| p.url.clone()))
        .or_else(|| std::env::var(DEFAULT_URL_ENV).ok())
        .ok_or(CliError::MissingUrl)?;

    let mut properties = Properties::new();
    if let Some(profile) = profile {
        properties.extend(profile.properties.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    properties.extend(args.properties.iter().cloned());

    Ok(Target { url, properties })
}
