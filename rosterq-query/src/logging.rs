//! Logging infrastructure for the rosterq search layer.
//!
//! Structured logging controlled by the `ROSTERQ_DEBUG` environment
//! variable.
//!
//! # Environment Variables
//!
//! - `ROSTERQ_DEBUG=true` - Enable debug logging
//! - `ROSTERQ_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `ROSTERQ_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use rosterq_query::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//! ```
//!
//! Within the crates, use the standard tracing macros:
//!
//! ```rust,ignore
//! use tracing::{debug, warn};
//!
//! debug!(filter = ?filter, "composed search predicate");
//! warn!(total = total, "eager count over a duplicating join");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `ROSTERQ_DEBUG`.
///
/// Returns `true` if `ROSTERQ_DEBUG` is set to "true", "1", or "yes"
/// (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("ROSTERQ_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `ROSTERQ_LOG_LEVEL`.
///
/// Defaults to "debug" if `ROSTERQ_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    if let Ok(level) = env::var("ROSTERQ_LOG_LEVEL") {
        match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => {
                if is_debug_enabled() {
                    "debug"
                } else {
                    "warn"
                }
            }
        }
    } else if is_debug_enabled() {
        "debug"
    } else {
        "warn"
    }
}

/// Get the configured log format from `ROSTERQ_LOG_FORMAT`.
///
/// Defaults to "json" for structured logging.
pub fn get_log_format() -> &'static str {
    env::var("ROSTERQ_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize the logging system.
///
/// Should be called once at application startup; subsequent calls are
/// no-ops. Does nothing unless the `tracing-subscriber` feature is
/// enabled.
pub fn init() {
    INIT.call_once(|| install_subscriber(get_log_level()));
}

/// Initialize with an explicit level, overriding the environment.
pub fn init_with_level(level: &str) {
    INIT.call_once(|| install_subscriber(level));
}

#[cfg(feature = "tracing-subscriber")]
fn install_subscriber(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rosterq={}", level)));

    let builder = fmt().with_env_filter(filter);
    match get_log_format() {
        "pretty" => builder.pretty().init(),
        "compact" => builder.compact().init(),
        _ => builder.json().init(),
    }
}

#[cfg(not(feature = "tracing-subscriber"))]
fn install_subscriber(_level: &str) {}
