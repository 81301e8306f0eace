//! # flightlink-conn
//!
//! Connection URL handling for Arrow Flight SQL clients.
//!
//! This crate provides:
//! - Parsing of `jdbc:arrow-flight://` and `jdbc:arrow-flight-sql://` URLs
//!   into their host, port and parameter arguments
//! - The catalogue of recognized connection properties, matched ignoring case
//! - Validated connection configuration (authentication, TLS, session properties)
//! - A driver entry point that declines URLs meant for other drivers
//!
//! ## Parsing
//!
//! ```rust
//! use flightlink_conn::{parse_url_args, ArgValue};
//!
//! let args = parse_url_args("jdbc:arrow-flight://localhost:2222?a=b&c=d")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(args.len(), 4);
//! assert_eq!(args.get("a"), Some(&ArgValue::Text("b".into())));
//! ```
//!
//! ## Resolving a configuration
//!
//! ```rust
//! use flightlink_conn::{FlightSqlDriver, Properties};
//!
//! let driver = FlightSqlDriver::new();
//! let props = Properties::new().set("token", "secret-token");
//! let config = driver
//!     .connect("jdbc:arrow-flight-sql://flight.example.com:443", &props)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(config.auth().method(), "token");
//! assert_eq!(config.location(), "grpc+tls://flight.example.com:443");
//! ```

pub mod connection;
pub mod logging;

pub use connection::{
    ArgValue, Auth, ConnectionError, ConnectionProperty, ConnectionResult, FlightConnectionConfig,
    FlightScheme, FlightSqlDriver, Properties, Secret, TlsOptions, UrlArgs, parse_url_args,
};
