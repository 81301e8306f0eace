//! `flightlink parse` command - Show the arguments and settings of a URL.

use flightlink_conn::{ArgValue, ConnectionProperty, FlightConnectionConfig, FlightScheme, UrlArgs};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::ParseArgs;
use crate::commands::resolve_target;
use crate::error::CliResult;
use crate::output::{self, kv, warn};

/// JSON report printed with `--json`
#[derive(Debug, Serialize)]
struct ParseReport<'a> {
    scheme: FlightScheme,
    arguments: Map<String, Value>,
    config: Option<&'a FlightConnectionConfig>,
    error: Option<String>,
}

/// Run the parse command
pub async fn run(args: ParseArgs) -> CliResult<()> {
    let target = resolve_target(&args.connection)?;
    let parsed = target.parse()?;
    let config = target.resolve();

    if args.json {
        let report = ParseReport {
            scheme: parsed.scheme(),
            arguments: redacted_arguments(&parsed),
            config: config.as_ref().ok(),
            error: config.as_ref().err().map(|e| e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return config.map(|_| ());
    }

    output::header("Parse URL");
    kv("Scheme", parsed.scheme().name());
    output::newline();

    output::section("Arguments");
    for (key, value) in parsed.iter() {
        kv(key, &display_value(key, value));
    }
    output::newline();

    let config = config?;
    output::section("Connection");
    kv("Location", &config.location());
    kv("Auth", config.auth().method());
    if let Some(user) = config.auth().user() {
        kv("User", user);
    }
    kv("TLS", if config.tls().enabled { "enabled" } else { "disabled" });
    kv("Thread pool", &config.thread_pool_size().to_string());
    if let Some(catalog) = config.catalog() {
        kv("Catalog", catalog);
    }
    if !config.session_properties().is_empty() {
        output::newline();
        output::section("Session properties");
        for (key, value) in config.session_properties() {
            kv(key, value);
        }
    }
    if !config.warnings().is_empty() {
        output::newline();
        for warning in config.warnings() {
            warn(warning);
        }
    }

    Ok(())
}

fn is_secret(key: &str) -> bool {
    ConnectionProperty::from_key(key).is_some_and(|p| p.is_secret())
}

fn display_value(key: &str, value: &ArgValue) -> String {
    if is_secret(key) {
        "***".to_string()
    } else {
        match value {
            ArgValue::Text(s) if s.is_empty() => "(empty)".to_string(),
            other => other.to_string(),
        }
    }
}

fn redacted_arguments(args: &UrlArgs) -> Map<String, Value> {
    args.iter()
        .map(|(key, value)| {
            let value = match value {
                _ if is_secret(key) => Value::from("***"),
                ArgValue::Text(s) => Value::from(s.as_str()),
                ArgValue::Integer(n) => Value::from(*n),
            };
            (key.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightlink_conn::parse_url_args;

    #[test]
    fn test_redacted_arguments() {
        let args = parse_url_args("jdbc:arrow-flight://localhost:2222?password=pw&user=admin")
            .unwrap()
            .unwrap();
        let map = redacted_arguments(&args);
        assert_eq!(map["port"], Value::from(2222));
        assert_eq!(map["password"], Value::from("***"));
        assert_eq!(map["user"], Value::from("admin"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value("Token", &ArgValue::from("abc")), "***");
        assert_eq!(display_value("host", &ArgValue::from("")), "(empty)");
        assert_eq!(display_value("port", &ArgValue::from(10)), "10");
    }
}
