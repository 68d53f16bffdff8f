use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Prefix marking a route the auto-router cannot reach.
///
/// Non-default methods of the default controller get this prefix: the
/// controller's own segment is hidden behind `/`, so `home/foo` is listed for
/// reference but never dispatched.
pub const UNROUTABLE_PREFIX: &str = "x ";

/// Ordered parameter name → "required?" mapping.
///
/// `true` means the parameter has no default value and must be supplied.
/// Entries keep the method signature's declaration order, and serialise as a
/// map in that same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap(Vec<(String, bool)>);

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, required: bool) {
        let name = name.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = required,
            None => self.0.push((name, required)),
        }
    }

    /// Whether `name` is required; `None` if the method has no such parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for ParamMap {
    fn from_iter<T: IntoIterator<Item = (K, bool)>>(iter: T) -> Self {
        let mut map = ParamMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for ParamMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One auto-discovered route.
///
/// Created fresh by every `read()` call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    /// Lower-case HTTP verb (`get`, `post`, ...)
    pub method: String,
    /// Slash-separated route without leading slash, `/` for the site root
    pub route: String,
    /// Positional parameter pattern, e.g. `/..[/..]`
    pub route_params: String,
    /// `\Fully\Qualified\Class::methodName`
    pub handler: String,
    /// Parameter name → required, in declaration order
    pub params: ParamMap,
}

impl RouteDescriptor {
    /// `false` for routes carrying the [`UNROUTABLE_PREFIX`] marker.
    #[must_use]
    pub fn is_routable(&self) -> bool {
        !self.route.starts_with(UNROUTABLE_PREFIX)
    }

    /// Route as an absolute path (`newautorouting` → `/newautorouting`).
    #[must_use]
    pub fn path(&self) -> String {
        let route = self.route.trim_start_matches(UNROUTABLE_PREFIX);
        if route.starts_with('/') {
            route.to_string()
        } else {
            format!("/{route}")
        }
    }

    /// Name of the controller method behind this route.
    #[must_use]
    pub fn method_name(&self) -> &str {
        self.handler
            .rsplit_once("::")
            .map(|(_, name)| name)
            .unwrap_or(&self.handler)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    fn descriptor(route: &str) -> RouteDescriptor {
        RouteDescriptor {
            method: "get".to_string(),
            route: route.to_string(),
            route_params: "/..[/..]".to_string(),
            handler: "\\App\\Controllers\\Blog::getShow".to_string(),
            params: [("slug", true), ("page", false)].into_iter().collect(),
        }
    }

    #[test]
    fn test_serializes_params_in_declaration_order() {
        let mut params = ParamMap::new();
        params.insert("zeta", true);
        params.insert("alpha", false);
        let value = serde_json::to_string(&params).unwrap();
        assert_eq!(value, r#"{"zeta":true,"alpha":false}"#);
    }

    #[test]
    fn test_descriptor_serialization_keys() {
        let value = serde_json::to_value(descriptor("blog/show")).unwrap();
        assert_eq!(
            value,
            json!({
                "method": "get",
                "route": "blog/show",
                "route_params": "/..[/..]",
                "handler": "\\App\\Controllers\\Blog::getShow",
                "params": { "slug": true, "page": false }
            })
        );
    }

    #[test]
    fn test_routability_and_path() {
        assert!(descriptor("blog/show").is_routable());
        assert_eq!(descriptor("blog/show").path(), "/blog/show");
        assert_eq!(descriptor("/").path(), "/");

        let hidden = descriptor("x home/foo");
        assert!(!hidden.is_routable());
        assert_eq!(hidden.path(), "/home/foo");
    }

    #[test]
    fn test_method_name() {
        assert_eq!(descriptor("blog/show").method_name(), "getShow");
    }

    #[test]
    fn test_param_map_lookup() {
        let params = descriptor("blog").params;
        assert_eq!(params.get("slug"), Some(true));
        assert_eq!(params.get("page"), Some(false));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.names().collect::<Vec<_>>(), ["slug", "page"]);
    }
}
