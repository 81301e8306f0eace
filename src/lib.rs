//! # Flightlink
//!
//! Connection URL handling for Arrow Flight SQL clients.
//!
//! Flightlink provides:
//! - A parser for `jdbc:arrow-flight://` and `jdbc:arrow-flight-sql://` URLs
//! - Case-insensitive matching of the recognized connection properties
//! - Validated connection settings: authentication, TLS and session properties
//! - A driver entry point that declines URLs belonging to other drivers
//!
//! ## Quick Start
//!
//! ```rust
//! use flightlink::prelude::*;
//!
//! fn main() -> Result<(), ConnectionError> {
//!     let props = Properties::new().set("user", "admin").set("password", "password");
//!
//!     let Some(config) = FlightSqlDriver::new()
//!         .connect("jdbc:arrow-flight://127.0.0.1:50060?useEncryption=false", &props)?
//!     else {
//!         unreachable!("arrow-flight URLs are always accepted");
//!     };
//!
//!     assert_eq!(config.location(), "grpc+tcp://127.0.0.1:50060");
//!     assert_eq!(config.auth().user(), Some("admin"));
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// URL parsing, connection properties and configuration.
pub mod connection {
    pub use flightlink_conn::connection::*;
}

/// Logging setup.
pub mod logging {
    pub use flightlink_conn::logging::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::connection::{
        ArgValue, Auth, ConnectionError, ConnectionProperty, ConnectionResult,
        FlightConnectionConfig, FlightScheme, FlightSqlDriver, Properties, UrlArgs,
        parse_url_args,
    };
}

// Re-export key types at the crate root
pub use connection::{ConnectionError, FlightConnectionConfig, FlightSqlDriver, parse_url_args};
