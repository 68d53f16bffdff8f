use tracing::{debug, info, warn};

use super::params::infer_params;
use super::types::{RouteDescriptor, UNROUTABLE_PREFIX};
use crate::config::{ReaderConfig, RoutingConfig};
use crate::error::ReaderError;
use crate::introspect::{ControllerSignature, Introspector, MethodSignature};
use crate::naming::CaseTranslation;

/// Suffix removed from class names when `strip_controller_suffix` is enabled.
const CONTROLLER_SUFFIX: &str = "Controller";

/// Reads a controller's method signatures and derives its auto-routes.
///
/// The reader holds no mutable state: reading the same controller twice with
/// the same configuration yields identical descriptors.
///
/// # Example
///
/// ```
/// use autoroute::config::{ReaderConfig, RoutingConfig};
/// use autoroute::introspect::{ControllerSignature, MethodSignature, ParamSignature, StaticIntrospector};
/// use autoroute::reader::ControllerMethodReader;
///
/// let introspector = StaticIntrospector::new().with_controller(
///     ControllerSignature::new("App\\Controllers\\Blog")
///         .method(MethodSignature::public("getShow", vec![ParamSignature::required("slug")])),
/// );
/// let config = ReaderConfig::new("App\\Controllers", ["get", "post"]).unwrap();
/// let reader = ControllerMethodReader::new(introspector, config, RoutingConfig::default());
///
/// let routes = reader.read("App\\Controllers\\Blog").unwrap();
/// assert_eq!(routes[0].route, "blog/show");
/// assert_eq!(routes[0].route_params, "/..");
/// assert_eq!(routes[0].handler, "\\App\\Controllers\\Blog::getShow");
/// ```
#[derive(Debug, Clone)]
pub struct ControllerMethodReader<I> {
    introspector: I,
    config: ReaderConfig,
    routing: RoutingConfig,
    translation: CaseTranslation,
}

impl<I: Introspector> ControllerMethodReader<I> {
    pub fn new(introspector: I, config: ReaderConfig, routing: RoutingConfig) -> Self {
        if routing.translate_uri_dashes && routing.translate_uri_to_camel_case {
            warn!(
                "Both translate_uri_dashes and translate_uri_to_camel_case are enabled; \
                camel-case translation takes precedence"
            );
        }
        let translation = CaseTranslation::from_config(&routing);
        Self {
            introspector,
            config,
            routing,
            translation,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    #[must_use]
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    #[must_use]
    pub fn translation(&self) -> CaseTranslation {
        self.translation
    }

    /// Derive the auto-routes of `class`.
    ///
    /// Descriptors come out in the method declaration order reported by the
    /// introspector.
    ///
    /// # Errors
    ///
    /// [`ReaderError::UninspectableClass`] when the introspector cannot
    /// describe `class`.
    pub fn read(&self, class: &str) -> Result<Vec<RouteDescriptor>, ReaderError> {
        let controller = self.introspector.inspect(class)?;
        Ok(self.read_signature(&controller))
    }

    /// Derive the auto-routes of an already inspected controller.
    #[must_use]
    pub fn read_signature(&self, controller: &ControllerSignature) -> Vec<RouteDescriptor> {
        let class = controller.qualified_name();

        if controller.has_remap() {
            debug!(class = %class, "Controller defines _remap, auto-routing disabled");
            return Vec::new();
        }
        if controller.is_abstract {
            debug!(class = %class, "Abstract controller skipped");
            return Vec::new();
        }

        let segments = self.class_segments(controller);
        let class_in_uri = segments.join("/");
        let is_default_controller = is_default_controller(controller, &self.routing);

        let mut output = Vec::new();
        for method in controller.public_methods() {
            if method.is_magic() {
                continue;
            }
            let Some(verb) = match_verb(&self.config, &method.name) else {
                debug!(class = %class, method = %method.name, "No allowed verb prefix, skipped");
                continue;
            };

            let action = &method.name[verb.len()..];
            let route = if is_default_method(action, &self.routing) {
                if is_default_controller {
                    // The default controller's own segment is implied.
                    let directory = segments[..segments.len().saturating_sub(1)].join("/");
                    if directory.is_empty() {
                        "/".to_string()
                    } else {
                        directory
                    }
                } else {
                    class_in_uri.clone()
                }
            } else {
                let route = join_route(&class_in_uri, &self.translation.translate(action));
                if is_default_controller {
                    format!("{UNROUTABLE_PREFIX}{route}")
                } else {
                    route
                }
            };

            output.push(self.describe(controller, method, verb, route));
        }

        info!(
            class = %class,
            routes_count = output.len(),
            "Controller routes read"
        );
        output
    }

    fn describe(
        &self,
        controller: &ControllerSignature,
        method: &MethodSignature,
        verb: &str,
        route: String,
    ) -> RouteDescriptor {
        let (params, route_params) = infer_params(&method.params);
        let route = if route.is_empty() {
            "/".to_string()
        } else {
            route
        };
        RouteDescriptor {
            method: verb.to_string(),
            route,
            route_params,
            handler: format!("\\{}::{}", controller.qualified_name(), method.name),
            params,
        }
    }

    /// Path segments for the namespace remainder and the class name.
    fn class_segments(&self, controller: &ControllerSignature) -> Vec<String> {
        let qualified = controller.qualified_name();
        let root = self.config.root_namespace();

        let remainder = if root.is_empty() {
            qualified
        } else {
            match qualified
                .strip_prefix(root)
                .and_then(|rest| rest.strip_prefix('\\'))
            {
                Some(rest) => rest,
                None => {
                    debug!(
                        class = %qualified,
                        root_namespace = %root,
                        "Controller lies outside the root namespace"
                    );
                    qualified
                }
            }
        };

        let mut parts: Vec<&str> = remainder.split('\\').filter(|p| !p.is_empty()).collect();
        if let Some(last) = parts.last_mut() {
            *last = controller_name(*last, &self.routing);
        }

        parts
            .into_iter()
            .map(|part| self.translation.translate(part))
            .collect()
    }
}

/// First allowed verb that prefixes `method_name`, case-sensitively.
pub(crate) fn match_verb<'a>(config: &'a ReaderConfig, method_name: &str) -> Option<&'a str> {
    config
        .allowed_http_verbs()
        .iter()
        .map(String::as_str)
        .find(|verb| method_name.starts_with(verb))
}

/// An empty action (a method named after the bare verb) routes like the
/// default method.
pub(crate) fn is_default_method(action: &str, routing: &RoutingConfig) -> bool {
    action.is_empty() || action.eq_ignore_ascii_case(&routing.default_method)
}

/// Class name as used in routes, `Controller` suffix removed when configured.
/// A class named exactly `Controller` keeps its name.
pub(crate) fn controller_name<'a>(class_name: &'a str, routing: &RoutingConfig) -> &'a str {
    if !routing.strip_controller_suffix {
        return class_name;
    }
    match class_name.strip_suffix(CONTROLLER_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => class_name,
    }
}

pub(crate) fn is_default_controller(controller: &ControllerSignature, routing: &RoutingConfig) -> bool {
    controller_name(controller.short_name(), routing) == routing.default_controller
}

fn join_route(prefix: &str, segment: &str) -> String {
    match (prefix.is_empty(), segment.is_empty()) {
        (true, _) => segment.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}/{segment}"),
    }
}
