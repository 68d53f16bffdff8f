//! URI segment naming conventions.
//!
//! Pure string transformations that turn namespace components, controller
//! class names and action names into URI path segments. Nothing here knows
//! about controllers or reflection, so every policy can be tested directly.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::RoutingConfig;

// Lower-case letter or digit immediately followed by an upper-case letter.
#[allow(clippy::expect_used)]
static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("valid camel boundary regex"));

/// How controller and action names are turned into URI segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTranslation {
    /// Keep the name, only lower-casing its first letter (`Foo` → `foo`)
    None,
    /// Underscores become dashes, everything lower-cased (`Dash_method` → `dash-method`)
    Dashes,
    /// camelCase split into kebab-case (`SomeMethod` → `some-method`)
    CamelCase,
}

impl CaseTranslation {
    /// Pick the policy enabled in `config`.
    ///
    /// The two flags are mutually exclusive; camel-case translation takes
    /// precedence when both are set.
    #[must_use]
    pub fn from_config(config: &RoutingConfig) -> Self {
        if config.translate_uri_to_camel_case {
            CaseTranslation::CamelCase
        } else if config.translate_uri_dashes {
            CaseTranslation::Dashes
        } else {
            CaseTranslation::None
        }
    }

    /// Translate a single segment.
    #[must_use]
    pub fn translate(self, segment: &str) -> String {
        match self {
            CaseTranslation::None => lcfirst(segment),
            CaseTranslation::Dashes => dashes(&lcfirst(segment)),
            CaseTranslation::CamelCase => camel_to_kebab(&lcfirst(segment)),
        }
    }

    /// Translate every `/`-separated segment of `path`.
    #[must_use]
    pub fn translate_path(self, path: &str) -> String {
        path.split('/')
            .map(|segment| self.translate(segment))
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Lower-case the first character, leaving the rest untouched.
#[must_use]
pub fn lcfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Underscores to dashes, lower-cased.
#[must_use]
pub fn dashes(s: &str) -> String {
    s.replace('_', "-").to_lowercase()
}

/// Split camelCase at lower→upper boundaries, join with dashes, lower-case.
#[must_use]
pub fn camel_to_kebab(s: &str) -> String {
    CAMEL_BOUNDARY.replace_all(s, "$1-$2").to_lowercase()
}
