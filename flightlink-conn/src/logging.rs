//! Logging setup for Flightlink.
//!
//! The library only emits `tracing` events. Binaries opt into output by
//! calling [`init`] with the `tracing-subscriber` feature enabled; the
//! subscriber is configured from the environment:
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `FLIGHTLINK_DEBUG` | `true`, `1`, `yes` | off |
//! | `FLIGHTLINK_LOG_LEVEL` | `trace`, `debug`, `info`, `warn`, `error` | `debug` with `FLIGHTLINK_DEBUG`, else `warn` |
//! | `FLIGHTLINK_LOG_FORMAT` | `json`, `pretty`, `compact` | `json` |
//!
//! Events are written to stderr.
//!
//! ```rust,no_run
//! flightlink_conn::logging::init();
//! ```

use std::env;
use std::fmt;
use std::sync::Once;

const DEBUG_VAR: &str = "FLIGHTLINK_DEBUG";
const LEVEL_VAR: &str = "FLIGHTLINK_LOG_LEVEL";
const FORMAT_VAR: &str = "FLIGHTLINK_LOG_FORMAT";

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static INIT: Once = Once::new();

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line, human-oriented output.
    Pretty,
    /// Single-line output.
    Compact,
}

impl LogFormat {
    /// Parse a format name, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }

    /// Get the format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether `FLIGHTLINK_DEBUG` asks for debug output.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR).is_ok_and(|v| {
        let v = v.to_ascii_lowercase();
        v == "true" || v == "1" || v == "yes"
    })
}

/// Get the level from `FLIGHTLINK_LOG_LEVEL`.
///
/// Unknown or unset values fall back to `debug` when [`is_debug_enabled`],
/// otherwise `warn`.
pub fn get_log_level() -> &'static str {
    env::var(LEVEL_VAR)
        .ok()
        .and_then(|v| normalize_level(&v))
        .unwrap_or(if is_debug_enabled() { "debug" } else { "warn" })
}

/// Get the format from `FLIGHTLINK_LOG_FORMAT`.
pub fn get_log_format() -> LogFormat {
    env::var(FORMAT_VAR)
        .ok()
        .and_then(|v| LogFormat::parse(&v))
        .unwrap_or_default()
}

/// Install the subscriber if the environment asks for logging.
///
/// Without `FLIGHTLINK_DEBUG` or `FLIGHTLINK_LOG_LEVEL` this is a no-op, so
/// command output stays clean by default. Only the first call of any of the
/// `init` functions has an effect.
pub fn init() {
    if is_debug_enabled() || env::var(LEVEL_VAR).is_ok() {
        install(get_log_level());
    }
}

/// Install the subscriber at `level`, ignoring `FLIGHTLINK_LOG_LEVEL`.
///
/// An unknown level name falls back to `warn`.
pub fn init_with_level(level: &str) {
    install(normalize_level(level).unwrap_or("warn"));
}

/// Install the subscriber at debug level.
pub fn init_debug() {
    install("debug");
}

fn normalize_level(level: &str) -> Option<&'static str> {
    let level = level.to_ascii_lowercase();
    LEVELS.into_iter().find(|known| *known == level)
}

fn install(level: &'static str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

            let directives = ["flightlink", "flightlink_conn", "flightlink_cli"]
                .map(|target| format!("{}={}", target, level))
                .join(",");
            let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("warn"));

            let format = get_log_format();
            let layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
                LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
                LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
                LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
            };

            if tracing_subscriber::registry().with(layer).with(filter).try_init().is_ok() {
                tracing::debug!(level, format = %format, "Logging initialized");
            }
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        let _ = level;
    });
}
