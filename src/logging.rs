//! Structured logging setup.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the embedding application or to tests. [`init_logging_with_config`]
//! installs a JSON or pretty-printed `tracing-subscriber` stack filtered by
//! level and optional per-target directives.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `AUTOROUTE_LOG_LEVEL` | `info` | trace/debug/info/warn/error |
//! | `AUTOROUTE_LOG_FORMAT` | `json` | `json` or `pretty` |
//! | `AUTOROUTE_LOG_TARGET_FILTER` | unset | comma-separated `target=level` directives |
//! | `AUTOROUTE_LOG_INCLUDE_LOCATION` | `false` | include file:line |
//!
//! `RUST_LOG`, when set, replaces the level from `AUTOROUTE_LOG_LEVEL`.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Extra `target=level` directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Parse configuration from `AUTOROUTE_LOG_*` variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: env::var("AUTOROUTE_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: env::var("AUTOROUTE_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(defaults.format),
            target_filter: env::var("AUTOROUTE_LOG_TARGET_FILTER").ok(),
            include_location: env::var("AUTOROUTE_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.include_location),
        }
    }

    /// Verbose pretty output for tests and local runs
    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
            include_location: true,
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(target_filter) = &self.target_filter {
            for directive in target_filter.split(',').map(str::trim).filter(|d| !d.is_empty()) {
                match directive.parse() {
                    Ok(d) => filter = filter.add_directive(d),
                    Err(e) => eprintln!("Warning: Invalid log filter directive '{directive}': {e}"),
                }
            }
        }
        filter
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already installed; callers that may run
/// more than once (tests) can ignore that error.
///
/// ```no_run
/// use autoroute::logging::{init_logging_with_config, LogConfig};
///
/// init_logging_with_config(&LogConfig::from_env()).ok();
/// ```
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

/// [`init_logging_with_config`] with [`LogConfig::from_env`].
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LogConfig::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

    const LOG_VARS: [&str; 4] = [
        "AUTOROUTE_LOG_LEVEL",
        "AUTOROUTE_LOG_FORMAT",
        "AUTOROUTE_LOG_TARGET_FILTER",
        "AUTOROUTE_LOG_INCLUDE_LOCATION",
    ];

    fn from_env_with(vars: &[(&str, &str)]) -> LogConfig {
        let _guard = ENV_LOCK.lock();
        for name in LOG_VARS {
            env::remove_var(name);
        }
        for (name, value) in vars {
            env::set_var(name, value);
        }
        let config = LogConfig::from_env();
        for name in LOG_VARS {
            env::remove_var(name);
        }
        config
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.include_location);
    }

    #[test]
    fn test_log_config_default_dev() {
        let config = LogConfig::default_dev();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.include_location);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Json);
    }

    #[test]
    fn test_level_parse_falls_back_to_info() {
        let mut config = LogConfig::default();
        config.log_level = "WARN".to_string();
        assert_eq!(config.level(), Level::WARN);
        config.log_level = "loud".to_string();
        assert_eq!(config.level(), Level::INFO);
    }

    #[test]
    fn test_second_init_reports_error() {
        let config = LogConfig::default_dev();
        // The first call may fail too if another test installed a subscriber.
        init_logging_with_config(&config).ok();
        assert!(init_logging_with_config(&config).is_err());
    }

    #[test]
    fn test_from_env_defaults() {
        let config = from_env_with(&[]);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.target_filter, None);
        assert!(!config.include_location);
    }

    #[test]
    fn test_from_env_reads_variables() {
        let config = from_env_with(&[
            ("AUTOROUTE_LOG_LEVEL", "trace"),
            ("AUTOROUTE_LOG_FORMAT", "Pretty"),
            ("AUTOROUTE_LOG_TARGET_FILTER", "autoroute::router=debug"),
            ("AUTOROUTE_LOG_INCLUDE_LOCATION", "true"),
        ]);
        assert_eq!(config.level(), Level::TRACE);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.target_filter.as_deref(), Some("autoroute::router=debug"));
        assert!(config.include_location);
    }

    #[test]
    fn test_from_env_unparseable_location_falls_back() {
        let config = from_env_with(&[("AUTOROUTE_LOG_INCLUDE_LOCATION", "sometimes")]);
        assert!(!config.include_location);
    }
}
