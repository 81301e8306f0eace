//! Connection URL parsing and Flight SQL connection configuration.
//!
//! This module turns a JDBC-style Arrow Flight SQL connection URL plus a set of
//! caller-supplied properties into a validated [`FlightConnectionConfig`].
//!
//! # Supported URL Formats
//!
//! ```text
//! jdbc:arrow-flight://host:port
//! jdbc:arrow-flight-sql://host:port
//! jdbc:arrow-flight-sql://host:port?key=value&key2=value2
//! jdbc:arrow-flight-sql://host:port/?key=value&key2=value2
//! jdbc:arrow-flight-sql://host:port/;key=value;key2=value2
//! ```
//!
//! # Parsing Connection URLs
//!
//! ```rust
//! use flightlink_conn::connection::{parse_url_args, ArgValue};
//!
//! let args = parse_url_args("jdbc:arrow-flight-sql://localhost:32010?useEncryption=false")
//!     .unwrap()
//!     .expect("recognized scheme");
//! assert_eq!(args.host(), Some("localhost"));
//! assert_eq!(args.port(), Some(32010));
//! assert_eq!(args.get("useEncryption"), Some(&ArgValue::Text("false".into())));
//! assert_eq!(args.len(), 3);
//!
//! // Other schemes are declined, not rejected.
//! assert!(parse_url_args("jdbc:mysql://localhost:3306").unwrap().is_none());
//! ```
//!
//! # Resolving a Configuration
//!
//! ```rust
//! use flightlink_conn::connection::{FlightSqlDriver, Properties};
//!
//! let props = Properties::new().set("user", "admin").set("password", "secret");
//! let config = FlightSqlDriver::new()
//!     .connect("jdbc:arrow-flight://127.0.0.1:50060?useEncryption=false", &props)
//!     .unwrap()
//!     .expect("recognized scheme");
//! assert_eq!(config.port(), 50060);
//! assert_eq!(config.location(), "grpc+tcp://127.0.0.1:50060");
//! ```

mod config;
mod driver;
mod parser;
mod property;

pub use config::{Auth, FlightConnectionConfig, Secret, TlsOptions, EXPECTED_URL_FORMAT};
pub use driver::{FlightSqlDriver, DEFAULT_URL_ENV};
pub use parser::{parse_url_args, ArgValue, FlightScheme, UrlArgs};
pub use property::{ConnectionProperty, Properties};

use thiserror::Error;

/// Errors that can occur while parsing a URL or resolving a configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// A percent-escape in the parameter tail could not be decoded.
    #[error("Invalid percent-encoding in URL parameter '{segment}': {message}")]
    InvalidEncoding { segment: String, message: String },

    /// A parameter in the tail is not a `key=value` pair. Holds the key only.
    #[error("URL parameters must be provided in key-value pairs separated by '=': parameter '{0}'")]
    InvalidParameter(String),

    /// Missing required field (host or port).
    #[error("URL must have a {field}. Expected format: {expected}")]
    MissingField {
        field: &'static str,
        expected: &'static str,
    },

    /// Invalid option value.
    #[error("Invalid option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    /// Environment variable not found.
    #[error("Environment variable not found: {0}")]
    EnvNotFound(String),
}

impl ConnectionError {
    /// Create a missing-field error carrying the expected URL format.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField {
            field,
            expected: EXPECTED_URL_FORMAT,
        }
    }

    /// Create an invalid-option error.
    pub fn invalid_option(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;
