//! Driver entry point: accept or decline a URL and resolve its configuration.

use super::{
    parse_url_args, ConnectionError, ConnectionResult, FlightConnectionConfig, FlightScheme,
    Properties,
};
use tracing::{debug, info, warn};

/// Environment variable read by [`FlightSqlDriver::connect_from_default_env`].
pub const DEFAULT_URL_ENV: &str = "FLIGHT_SQL_URL";

/// Arrow Flight SQL driver.
///
/// Resolving a URL does not touch the network; the returned
/// [`FlightConnectionConfig`] carries everything needed to open a channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlightSqlDriver;

impl FlightSqlDriver {
    /// Create a driver.
    pub fn new() -> Self {
        Self
    }

    /// Get the driver name.
    pub fn name(&self) -> &'static str {
        "Arrow Flight SQL"
    }

    /// Get the driver version.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Check whether the URL uses one of this driver's schemes.
    pub fn accepts_url(&self, url: &str) -> bool {
        FlightScheme::strip(url).is_some()
    }

    /// Resolve the configuration for a URL.
    ///
    /// Returns `Ok(None)` when the URL belongs to another driver. URL
    /// arguments take precedence over `props`.
    ///
    /// ```rust
    /// use flightlink_conn::connection::{FlightSqlDriver, Properties};
    ///
    /// let driver = FlightSqlDriver::new();
    /// assert!(driver.connect("jdbc:mysql://localhost:32010", &Properties::new()).unwrap().is_none());
    ///
    /// let err = driver.connect("jdbc:arrow-flight://localhost", &Properties::new()).unwrap_err();
    /// assert!(err.to_string().starts_with("URL must have a port"));
    /// ```
    pub fn connect(
        &self,
        url: &str,
        props: &Properties,
    ) -> ConnectionResult<Option<FlightConnectionConfig>> {
        let Some(args) = parse_url_args(url)? else {
            debug!("Declining URL with unsupported prefix");
            return Ok(None);
        };

        let config = FlightConnectionConfig::from_url_args(&args, props)?;
        for warning in config.warnings() {
            warn!(location = %config.location(), "{}", warning);
        }
        info!(location = %config.location(), auth = config.auth().method(), "Flight SQL connection resolved");
        Ok(Some(config))
    }

    /// Resolve the configuration for the URL held in an environment variable.
    pub fn connect_from_env(
        &self,
        var: &str,
        props: &Properties,
    ) -> ConnectionResult<Option<FlightConnectionConfig>> {
        let url = std::env::var(var).map_err(|_| ConnectionError::EnvNotFound(var.to_string()))?;
        self.connect(&url, props)
    }

    /// Resolve the configuration for the URL in `FLIGHT_SQL_URL`.
    pub fn connect_from_default_env(
        &self,
        props: &Properties,
    ) -> ConnectionResult<Option<FlightConnectionConfig>> {
        self.connect_from_env(DEFAULT_URL_ENV, props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn credentials() -> Properties {
        Properties::new()
            .set("user", "admin")
            .set("password", "password")
            .set("useEncryption", "false")
    }

    #[test]
    fn test_accepts_both_schemes() {
        let driver = FlightSqlDriver::new();
        assert!(driver.accepts_url("jdbc:arrow-flight://localhost:32010"));
        assert!(driver.accepts_url("jdbc:arrow-flight-sql://localhost:32010"));
        assert!(!driver.accepts_url("jdbc:mysql://localhost:32010"));
        assert!(!driver.accepts_url("arrow-flight://localhost:32010"));
    }

    #[test]
    fn test_declines_unsupported_prefix() {
        let driver = FlightSqlDriver::new();
        let result = driver
            .connect("jdbc:mysql://localhost:32010", &credentials())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_connect_with_valid_url() {
        let driver = FlightSqlDriver::new();
        for url in [
            "jdbc:arrow-flight://localhost:32010?useEncryption=false",
            "jdbc:arrow-flight-sql://localhost:32010?useEncryption=false",
        ] {
            let config = driver.connect(url, &credentials()).unwrap().unwrap();
            assert_eq!(config.host(), "localhost");
            assert_eq!(config.port(), 32010);
            assert_eq!(config.auth().user(), Some("admin"));
            assert_eq!(config.location(), "grpc+tcp://localhost:32010");
        }
    }

    #[test]
    fn test_connect_propagates_missing_host() {
        let err = FlightSqlDriver::new()
            .connect("jdbc:arrow-flight://:32010", &credentials())
            .unwrap_err();
        assert!(err.to_string().starts_with("URL must have a host"));
    }

    #[test]
    fn test_connect_reports_missing_host_for_swapped_authority() {
        let driver = FlightSqlDriver::new();
        for url in [
            "jdbc:arrow-flight://32010:localhost",
            "jdbc:arrow-flight-sql://32010:localhost",
        ] {
            let err = driver.connect(url, &credentials()).unwrap_err();
            assert!(err.to_string().contains("URL must have a host"));
        }
    }

    #[test]
    fn test_connect_propagates_parse_errors() {
        let err = FlightSqlDriver::new()
            .connect("jdbc:arrow-flight://localhost:32010?broken", &credentials())
            .unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidParameter(_)));
    }

    #[test]
    fn test_connect_from_env() {
        let var = "FLIGHTLINK_TEST_DRIVER_URL";
        // SAFETY: Variable name is unique to this test
        unsafe { std::env::set_var(var, "jdbc:arrow-flight-sql://127.0.0.1:50060") };
        let config = FlightSqlDriver::new()
            .connect_from_env(var, &credentials())
            .unwrap()
            .unwrap();
        assert_eq!(config.port(), 50060);
        unsafe { std::env::remove_var(var) };
    }

    #[test]
    fn test_connect_from_missing_env() {
        let err = FlightSqlDriver::new()
            .connect_from_env("FLIGHTLINK_TEST_UNSET_URL", &Properties::new())
            .unwrap_err();
        assert_eq!(err, ConnectionError::EnvNotFound("FLIGHTLINK_TEST_UNSET_URL".into()));
    }
}
