//! Structured fuzz target: builds well-formed URLs from arbitrary parts and
//! checks that every parameter, host overrides included, survives parsing and
//! re-rendering.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_url_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use flightlink_conn::{ArgValue, parse_url_args};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzUrl {
    sql_scheme: bool,
    semicolons: bool,
    port: u16,
    host_override: Option<String>,
    params: Vec<(String, String)>,
}

fuzz_target!(|input: FuzzUrl| {
    let prefix = if input.sql_scheme {
        "jdbc:arrow-flight-sql://"
    } else {
        "jdbc:arrow-flight://"
    };
    let separator = if input.semicolons { ";" } else { "&" };
    let introducer = if input.semicolons { "/;" } else { "?" };

    let params: Vec<(String, String)> = input
        .params
        .iter()
        .filter(|(k, _)| {
            let lower = k.to_ascii_lowercase();
            !k.is_empty() && lower != "host" && lower != "port"
        })
        .cloned()
        .collect();

    let mut url = format!("{}localhost:{}", prefix, input.port);
    let mut tail: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect();
    if let Some(host) = &input.host_override {
        tail.push(format!("HOST={}", encode(host)));
    }
    if !tail.is_empty() {
        url.push_str(introducer);
        url.push_str(&tail.join(separator));
    }

    let args = parse_url_args(&url)
        .expect("encoded parameters always parse")
        .expect("scheme is recognized");
    assert_eq!(args.port(), Some(input.port));
    for (k, v) in &params {
        assert!(args.contains_key(k));
        // later duplicates win, so only check the last value per key
        let last = params.iter().rev().find(|(key, _)| key == k).map(|(_, v)| v);
        if last == Some(v) {
            assert_eq!(args.get(k), Some(&ArgValue::Text(v.clone())));
        }
    }

    if let Some(host) = &input.host_override {
        assert_eq!(args.get("host"), Some(&ArgValue::Text(host.clone())));
    }

    let reparsed = parse_url_args(&args.to_url()).unwrap().unwrap();
    assert_eq!(reparsed, args);
});

fn encode(s: &str) -> String {
    s.bytes().map(|b| format!("%{:02X}", b)).collect()
}
