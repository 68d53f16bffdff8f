//! Route table core: compilation of descriptors and request matching.

use crate::reader::RouteDescriptor;
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of positional parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Bound positional parameters of a matched route, in declaration order.
///
/// Names come from the route's descriptor and are shared via `Arc<str>`;
/// values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request path to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route descriptor
    pub descriptor: Arc<RouteDescriptor>,
    /// Positional parameters present in the URL; omitted optional ones are absent
    pub params: ParamVec,
}

impl RouteMatch {
    /// Get a bound parameter by name.
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Handler reference of the matched route (`\Class::method`).
    #[must_use]
    pub fn handler(&self) -> &str {
        &self.descriptor.handler
    }

    /// Convert params to a HashMap. Allocates; prefer [`get_param`](Self::get_param).
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    method: Method,
    regex: Regex,
    param_names: Vec<Arc<str>>,
    descriptor: Arc<RouteDescriptor>,
}

/// Registrar for auto-discovered routes.
///
/// Immutable once built. Lookups scan routes in registration order and the
/// first match wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Register `descriptors`.
    ///
    /// Unreachable (`x `-marked) routes, descriptors whose verb is not an HTTP
    /// method and duplicates of an already registered verb + route + pattern
    /// are skipped.
    pub fn new<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = RouteDescriptor>,
    {
        let mut routes = Vec::new();
        let mut seen: HashSet<(String, String, String)> = HashSet::new();

        for descriptor in descriptors {
            if !descriptor.is_routable() {
                debug!(
                    route = %descriptor.route,
                    handler = %descriptor.handler,
                    "Skipping unreachable route"
                );
                continue;
            }

            let key = (
                descriptor.method.clone(),
                descriptor.route.clone(),
                descriptor.route_params.clone(),
            );
            if !seen.insert(key) {
                warn!(
                    method = %descriptor.method,
                    route = %descriptor.route,
                    route_params = %descriptor.route_params,
                    handler = %descriptor.handler,
                    "Duplicate route ignored, first registration wins"
                );
                continue;
            }

            let method = match Method::from_bytes(descriptor.method.to_ascii_uppercase().as_bytes())
            {
                Ok(m) => m,
                Err(_) => {
                    warn!(method = %descriptor.method, "Descriptor verb is not an HTTP method");
                    continue;
                }
            };

            let (pattern, param_names) = Self::descriptor_to_regex(&descriptor);
            let regex = match Regex::new(&pattern) {
                Ok(r) => r,
                Err(e) => {
                    warn!(route = %descriptor.route, error = %e, "Route pattern failed to compile");
                    continue;
                }
            };

            routes.push(CompiledRoute {
                method,
                regex,
                param_names,
                descriptor: Arc::new(descriptor),
            });
        }

        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|r| format!("{} {}{}", r.method, r.descriptor.path(), r.descriptor.route_params))
            .collect();
        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Auto-route table loaded"
        );

        Self { routes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter().map(|r| r.descriptor.as_ref())
    }

    /// Match a request to a registered route.
    ///
    /// Trailing slashes are not significant: `/blog/` matches like `/blog`.
    #[must_use]
    pub fn route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        // The root route compiles to an empty literal, so `/` is matched as "".
        let path = path.trim_end_matches('/');

        for route in self.routes.iter().filter(|r| r.method == method) {
            let Some(caps) = route.regex.captures(path) else {
                continue;
            };

            let params: ParamVec = route
                .param_names
                .iter()
                .enumerate()
                .filter_map(|(i, name)| {
                    caps.get(i + 1)
                        .map(|m| (Arc::clone(name), m.as_str().to_string()))
                })
                .collect();

            debug!(
                method = %method,
                path = %path,
                handler = %route.descriptor.handler,
                params = ?params,
                "Route matched"
            );
            return Some(RouteMatch {
                descriptor: Arc::clone(&route.descriptor),
                params,
            });
        }

        debug!(method = %method, path = %path, "No route matched");
        None
    }

    /// Convert a descriptor into a regex source and its ordered parameter names.
    ///
    /// `blog/save` with params `a` (required) and `b` (optional) becomes
    /// `^/blog/save/([^/]+)(?:/([^/]+))?$`. Optional parameters nest so that
    /// only a trailing run can be omitted.
    pub(crate) fn descriptor_to_regex(descriptor: &RouteDescriptor) -> (String, Vec<Arc<str>>) {
        let path = descriptor.path();
        let mut pattern = String::with_capacity(path.len() + 16 * descriptor.params.len());
        pattern.push('^');
        if path != "/" {
            pattern.push_str(&regex::escape(&path));
        }

        let mut param_names = Vec::with_capacity(descriptor.params.len());
        let mut open_groups = 0usize;
        for (name, required) in descriptor.params.iter() {
            if open_groups == 0 && required {
                pattern.push_str("/([^/]+)");
            } else {
                pattern.push_str("(?:/([^/]+)");
                open_groups += 1;
            }
            param_names.push(Arc::from(name));
        }
        for _ in 0..open_groups {
            pattern.push_str(")?");
        }

        pattern.push('$');
        (pattern, param_names)
    }
}
