//! Fuzz target for the connection URL parser.
//!
//! Feeds arbitrary strings to the parser and the driver to find panics.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_url_parser
//! ```

#![no_main]

use flightlink_conn::{FlightSqlDriver, Properties, parse_url_args};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // The parser should never panic, only return errors
        let _ = parse_url_args(input);

        // Same input behind each recognized prefix, so the tail is reached
        for prefix in ["jdbc:arrow-flight://", "jdbc:arrow-flight-sql://"] {
            let url = format!("{}{}", prefix, input);
            if let Ok(Some(args)) = parse_url_args(&url) {
                assert!(args.len() >= 2);
                assert!(args.contains_key("host"));
                assert!(args.contains_key("port"));
            }
            let _ = FlightSqlDriver::new().connect(&url, &Properties::new());
        }
    }
});
