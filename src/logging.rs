//! Logging setup
//!
//! Installs the global `tracing` subscriber for the binaries. `RUST_LOG`
//! takes precedence over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used when `RUST_LOG` is unset
pub fn default_directives(config: &LoggingConfig) -> String {
    format!("paxboard={},tower_http={}", config.level, config.level)
}

fn is_json(config: &LoggingConfig) -> bool {
    config.format.eq_ignore_ascii_case("json")
}

/// Initialize the global subscriber
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(config).into());

    let registry = tracing_subscriber::registry().with(filter);

    if is_json(config) {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };
        assert_eq!(default_directives(&config), "paxboard=debug,tower_http=debug");
        assert!(!is_json(&config));
    }

    #[test]
    fn test_json_format() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "JSON".to_string(),
        };
        assert!(is_json(&config));
    }
}
