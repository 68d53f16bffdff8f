//! # Routing Configuration Module
//!
//! Configuration consumed by the controller method reader.
//!
//! ## Overview
//!
//! [`RoutingConfig`] mirrors the framework's routing settings: which
//! case-translation policy applies to URI segments and which controller and
//! method are the defaults. [`ReaderConfig`] is the per-reader part: the root
//! namespace that maps to `/` and the allow-list of HTTP verbs.
//!
//! ## Sources
//!
//! Settings can come from a file (`.yaml`/`.yml`, `.toml`, anything else is
//! parsed as JSON) and are then overridden by environment variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `AUTOROUTE_TRANSLATE_URI_DASHES` | `translate_uri_dashes` |
//! | `AUTOROUTE_TRANSLATE_URI_TO_CAMEL_CASE` | `translate_uri_to_camel_case` |
//! | `AUTOROUTE_DEFAULT_CONTROLLER` | `default_controller` |
//! | `AUTOROUTE_DEFAULT_METHOD` | `default_method` |
//! | `AUTOROUTE_DEFAULT_NAMESPACE` | `default_namespace` |
//!
//! ## Usage
//!
//! ```rust
//! use autoroute::config::{ReaderConfig, RoutingConfig};
//!
//! let routing = RoutingConfig::from_env();
//! let reader_config = ReaderConfig::from_routing(&routing, ["get", "post"]).unwrap();
//! assert_eq!(reader_config.allowed_http_verbs(), ["get", "post"]);
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::warn;

use crate::error::ReaderError;

/// Routing settings shared by every reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Replace `_` with `-` in URI segments
    pub translate_uri_dashes: bool,
    /// Turn `camelCase` segments into `kebab-case`; wins over dash translation
    pub translate_uri_to_camel_case: bool,
    /// Short class name of the default controller (default: `Home`)
    pub default_controller: String,
    /// Action name of the default method (default: `index`)
    pub default_method: String,
    /// Namespace whose controllers map to the site root
    pub default_namespace: String,
    /// Drop a trailing `Controller` from class names before building segments
    pub strip_controller_suffix: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            translate_uri_dashes: false,
            translate_uri_to_camel_case: false,
            default_controller: "Home".to_string(),
            default_method: "index".to_string(),
            default_namespace: "App\\Controllers".to_string(),
            strip_controller_suffix: false,
        }
    }
}

impl RoutingConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Load settings from a file, then apply environment overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading routing config {}", path.display()))?;
        let mut config: RoutingConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override fields from `AUTOROUTE_*` environment variables.
    ///
    /// Unparseable boolean values are ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Some(v) = env_bool("AUTOROUTE_TRANSLATE_URI_DASHES") {
            self.translate_uri_dashes = v;
        }
        if let Some(v) = env_bool("AUTOROUTE_TRANSLATE_URI_TO_CAMEL_CASE") {
            self.translate_uri_to_camel_case = v;
        }
        if let Ok(v) = env::var("AUTOROUTE_DEFAULT_CONTROLLER") {
            self.default_controller = v;
        }
        if let Ok(v) = env::var("AUTOROUTE_DEFAULT_METHOD") {
            self.default_method = v;
        }
        if let Ok(v) = env::var("AUTOROUTE_DEFAULT_NAMESPACE") {
            self.default_namespace = v;
        }
    }
}

fn env_bool(name: &str) -> Option<bool> {
    let raw = env::var(name).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!(variable = name, value = %raw, "Ignoring unparseable boolean override");
            None
        }
    }
}

/// Per-reader configuration: root namespace and verb allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    root_namespace: String,
    allowed_http_verbs: Vec<String>,
}

impl ReaderConfig {
    /// Build a reader configuration.
    ///
    /// Verbs are lowercased and deduplicated, keeping first-seen order. Order
    /// matters: when several verbs prefix a method name the first one wins.
    ///
    /// # Errors
    ///
    /// [`ReaderError::InvalidVerb`] when a verb is empty or is not a valid
    /// HTTP method token.
    pub fn new<I, S>(root_namespace: impl Into<String>, verbs: I) -> Result<Self, ReaderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed_http_verbs: Vec<String> = Vec::new();
        for verb in verbs {
            let verb = verb.as_ref();
            let upper = verb.to_ascii_uppercase();
            if verb.is_empty() || http::Method::from_bytes(upper.as_bytes()).is_err() {
                return Err(ReaderError::InvalidVerb {
                    verb: verb.to_string(),
                });
            }
            let lower = verb.to_ascii_lowercase();
            if !allowed_http_verbs.contains(&lower) {
                allowed_http_verbs.push(lower);
            }
        }

        let root_namespace = root_namespace.into();
        Ok(Self {
            root_namespace: root_namespace.trim_matches('\\').to_string(),
            allowed_http_verbs,
        })
    }

    /// Reader configuration rooted at the routing config's default namespace.
    pub fn from_routing<I, S>(routing: &RoutingConfig, verbs: I) -> Result<Self, ReaderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(routing.default_namespace.clone(), verbs)
    }

    #[must_use]
    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    #[must_use]
    pub fn allowed_http_verbs(&self) -> &[String] {
        &self.allowed_http_verbs
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use parking_lot::Mutex;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Environment variables are process-wide; tests touching them run one at a time.
    static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

    const ROUTING_VARS: [&str; 5] = [
        "AUTOROUTE_TRANSLATE_URI_DASHES",
        "AUTOROUTE_TRANSLATE_URI_TO_CAMEL_CASE",
        "AUTOROUTE_DEFAULT_CONTROLLER",
        "AUTOROUTE_DEFAULT_METHOD",
        "AUTOROUTE_DEFAULT_NAMESPACE",
    ];

    fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let _guard = ENV_LOCK.lock();
        for name in ROUTING_VARS {
            env::remove_var(name);
        }
        for (name, value) in vars {
            env::set_var(name, value);
        }
        let result = f();
        for name in ROUTING_VARS {
            env::remove_var(name);
        }
        result
    }

    #[test]
    fn test_defaults() {
        let config = RoutingConfig::default();
        assert!(!config.translate_uri_dashes);
        assert!(!config.translate_uri_to_camel_case);
        assert_eq!(config.default_controller, "Home");
        assert_eq!(config.default_method, "index");
        assert_eq!(config.default_namespace, "App\\Controllers");
    }

    #[test]
    fn test_verbs_are_lowercased_and_deduplicated() {
        let config = ReaderConfig::new("App\\Controllers", ["GET", "post", "get"]).unwrap();
        assert_eq!(config.allowed_http_verbs(), ["get", "post"]);
    }

    #[test]
    fn test_invalid_verbs_rejected() {
        assert!(matches!(
            ReaderConfig::new("App", [""]),
            Err(ReaderError::InvalidVerb { .. })
        ));
        assert!(matches!(
            ReaderConfig::new("App", ["ge t"]),
            Err(ReaderError::InvalidVerb { verb }) if verb == "ge t"
        ));
    }

    #[test]
    fn test_root_namespace_is_trimmed() {
        let config = ReaderConfig::new("\\App\\Controllers\\", ["get"]).unwrap();
        assert_eq!(config.root_namespace(), "App\\Controllers");
    }

    #[test]
    fn test_load_yaml_partial() {
        with_env(&[], || {
            let mut temp = NamedTempFile::with_suffix(".yaml").expect("create temp file");
            temp.write_all(b"translate_uri_dashes: true\ndefault_controller: Welcome\n")
                .expect("write config");
            temp.flush().expect("flush");

            let config = RoutingConfig::load(temp.path()).unwrap();
            assert!(config.translate_uri_dashes);
            assert_eq!(config.default_controller, "Welcome");
            assert_eq!(config.default_method, "index");
        });
    }

    #[test]
    fn test_load_toml() {
        with_env(&[], || {
            let mut temp = NamedTempFile::with_suffix(".toml").expect("create temp file");
            temp.write_all(b"translate_uri_to_camel_case = true\ndefault_namespace = \"Site\\\\Controllers\"\n")
                .expect("write config");
            temp.flush().expect("flush");

            let config = RoutingConfig::load(temp.path()).unwrap();
            assert!(config.translate_uri_to_camel_case);
            assert_eq!(config.default_namespace, "Site\\Controllers");
        });
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        with_env(&[], || {
            let mut temp = NamedTempFile::with_suffix(".json").expect("create temp file");
            temp.write_all(b"{ not json").expect("write config");
            temp.flush().expect("flush");

            assert!(RoutingConfig::load(temp.path()).is_err());
        });
    }

    #[test]
    fn test_env_bool_overrides() {
        let config = with_env(
            &[
                ("AUTOROUTE_TRANSLATE_URI_DASHES", "TRUE"),
                ("AUTOROUTE_TRANSLATE_URI_TO_CAMEL_CASE", "0"),
            ],
            RoutingConfig::from_env,
        );
        assert!(config.translate_uri_dashes);
        assert!(!config.translate_uri_to_camel_case);

        let config = with_env(
            &[
                ("AUTOROUTE_TRANSLATE_URI_DASHES", " off "),
                ("AUTOROUTE_TRANSLATE_URI_TO_CAMEL_CASE", "yes"),
            ],
            RoutingConfig::from_env,
        );
        assert!(!config.translate_uri_dashes);
        assert!(config.translate_uri_to_camel_case);
    }

    #[test]
    fn test_env_unparseable_bool_is_ignored() {
        let mut config = RoutingConfig {
            translate_uri_dashes: true,
            ..RoutingConfig::default()
        };
        with_env(
            &[
                ("AUTOROUTE_TRANSLATE_URI_DASHES", "maybe"),
                ("AUTOROUTE_TRANSLATE_URI_TO_CAMEL_CASE", ""),
            ],
            || config.apply_env_overrides(),
        );
        assert!(config.translate_uri_dashes);
        assert!(!config.translate_uri_to_camel_case);
    }

    #[test]
    fn test_env_string_overrides() {
        let config = with_env(
            &[
                ("AUTOROUTE_DEFAULT_CONTROLLER", "Welcome"),
                ("AUTOROUTE_DEFAULT_METHOD", "show"),
                ("AUTOROUTE_DEFAULT_NAMESPACE", "Site\\Controllers"),
            ],
            RoutingConfig::from_env,
        );
        assert_eq!(config.default_controller, "Welcome");
        assert_eq!(config.default_method, "show");
        assert_eq!(config.default_namespace, "Site\\Controllers");
        assert!(!config.translate_uri_dashes);
    }

    #[test]
    fn test_from_env_without_variables_is_default() {
        assert_eq!(with_env(&[], RoutingConfig::from_env), RoutingConfig::default());
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        with_env(&[("AUTOROUTE_DEFAULT_CONTROLLER", "Landing")], || {
            let mut temp = NamedTempFile::with_suffix(".yaml").expect("create temp file");
            temp.write_all(b"default_controller: Welcome\ndefault_method: show\n")
                .expect("write config");
            temp.flush().expect("flush");

            let config = RoutingConfig::load(temp.path()).unwrap();
            assert_eq!(config.default_controller, "Landing");
            assert_eq!(config.default_method, "show");
        });
    }
}
