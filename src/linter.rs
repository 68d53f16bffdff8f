//! # Controller Linter Module
//!
//! Flags controller signatures whose auto-routes are ambiguous or unreachable.
//!
//! ## Checks Performed
//!
//! 1. **required_after_optional** - A required parameter follows an optional
//!    one. The route pattern brackets everything from the first optional
//!    parameter on, so the required one becomes omissible in the URL.
//! 2. **empty_action** - A method named after the bare verb (`get()`); it is
//!    routed like the default method and can collide with it.
//! 3. **remap_disables_autoroute** - The controller declares `_remap`.
//!    Abstract controllers are skipped entirely, as the reader skips them.
//! 4. **unreachable_default_controller_method** - A non-default method of the
//!    default controller; its route is listed with the `x ` marker only.
//! 5. **duplicate_route** - Two descriptors share verb, route and pattern.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use autoroute::linter::{lint_controller, LintSeverity};
//!
//! for issue in lint_controller(&signature, reader.config(), reader.routing()) {
//!     eprintln!("[{}] {}: {}", issue.severity, issue.location, issue.message);
//! }
//! ```

use crate::config::{ReaderConfig, RoutingConfig};
use crate::introspect::ControllerSignature;
use crate::reader::{is_default_controller, is_default_method, match_verb, RouteDescriptor};
use std::collections::HashMap;
use std::fmt;


/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Error - routes conflict
    Error,
    /// Warning - the derived route probably does not mean what the author intended
    Warning,
    /// Info - routing behaviour worth knowing about
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "ERROR"),
            LintSeverity::Warning => write!(f, "WARN"),
            LintSeverity::Info => write!(f, "INFO"),
        }
    }
}

/// A lint issue found in a controller signature
#[derive(Debug, Clone)]
pub struct LintIssue {
    /// Where the issue occurred (e.g., "App\Controllers\Blog::getShow")
    pub location: String,
    /// Severity of the issue
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "required_after_optional")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint one controller signature.
#[must_use]
pub fn lint_controller(
    controller: &ControllerSignature,
    config: &ReaderConfig,
    routing: &RoutingConfig,
) -> Vec<LintIssue> {
    let class = controller.qualified_name();
    let mut issues = Vec::new();

    if controller.has_remap() {
        issues.push(LintIssue::new(
            class,
            LintSeverity::Info,
            "remap_disables_autoroute",
            "Controller defines _remap; none of its methods are auto-routed",
        ));
        return issues;
    }
    // Abstract controllers produce no routes.
    if controller.is_abstract {
        return issues;
    }

    let is_default_controller = is_default_controller(controller, routing);

    for method in controller.public_methods().filter(|m| !m.is_magic()) {
        let Some(verb) = match_verb(config, &method.name) else {
            continue;
        };
        let location = format!("{}::{}", class, method.name);
        let action = &method.name[verb.len()..];

        if let Some(optional) = method.params.iter().position(|p| p.has_default) {
            for late in method.params[optional..].iter().filter(|p| !p.has_default) {
                issues.push(
                    LintIssue::new(
                        &location,
                        LintSeverity::Warning,
                        "required_after_optional",
                        format!(
                            "Required parameter '{}' follows optional parameter '{}'",
                            late.name, method.params[optional].name
                        ),
                    )
                    .with_suggestion("Move required parameters before optional ones"),
                );
            }
        }

        if action.is_empty() {
            issues.push(
                LintIssue::new(
                    &location,
                    LintSeverity::Warning,
                    "empty_action",
                    format!("Method name is the bare verb '{verb}' and routes like the default method"),
                )
                .with_suggestion(format!("Rename to '{verb}{}'", capitalize(&routing.default_method))),
            );
        } else if is_default_controller && !is_default_method(action, routing) {
            issues.push(LintIssue::new(
                &location,
                LintSeverity::Info,
                "unreachable_default_controller_method",
                "Non-default methods of the default controller are not reachable through auto-routing",
            ));
        }
    }

    issues
}

/// Report descriptors that register the same verb, route and pattern twice.
#[must_use]
pub fn lint_descriptors(descriptors: &[RouteDescriptor]) -> Vec<LintIssue> {
    let mut first_seen: HashMap<(&str, &str, &str), &str> = HashMap::new();
    let mut issues = Vec::new();

    for d in descriptors.iter().filter(|d| d.is_routable()) {
        let key = (d.method.as_str(), d.route.as_str(), d.route_params.as_str());
        match first_seen.get(&key) {
            Some(first) => issues.push(LintIssue::new(
                d.handler.trim_start_matches('\\'),
                LintSeverity::Error,
                "duplicate_route",
                format!(
                    "{} {}{} is already handled by {}",
                    d.method, d.route, d.route_params, first
                ),
            )),
            None => {
                first_seen.insert(key, d.handler.as_str());
            }
        }
    }

    issues
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
