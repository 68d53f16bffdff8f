use serde::{Deserialize, Serialize};

use crate::error::ReaderError;

/// Name of the catch-all dispatch override that disables auto-routing.
pub const REMAP_METHOD: &str = "_remap";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// One positional parameter of a controller method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSignature {
    pub name: String,
    /// `true` when the parameter declares a default value
    #[serde(default)]
    pub has_default: bool,
}

impl ParamSignature {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_default: false,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_default: true,
        }
    }
}

/// A method as reported by the introspector, parameters in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub params: Vec<ParamSignature>,
}

impl MethodSignature {
    pub fn public(name: impl Into<String>, params: Vec<ParamSignature>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            params,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Magic methods and constructors are never routed.
    #[must_use]
    pub fn is_magic(&self) -> bool {
        self.name.starts_with("__")
    }
}

/// Reflection metadata of a controller class, methods in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSignature {
    /// Fully-qualified class name, namespace components separated by `\`
    pub class: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
}

impl ControllerSignature {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            is_abstract: false,
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: MethodSignature) -> Self {
        self.methods.push(method);
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Class name without its leading `\`.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        self.class.trim_start_matches('\\')
    }

    /// Last namespace component: the class's own name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        let qualified = self.qualified_name();
        qualified.rsplit('\\').next().unwrap_or(qualified)
    }

    /// Whether the controller takes over dispatch through `_remap`.
    #[must_use]
    pub fn has_remap(&self) -> bool {
        self.methods.iter().any(|m| m.name == REMAP_METHOD)
    }

    pub fn public_methods(&self) -> impl Iterator<Item = &MethodSignature> {
        self.methods
            .iter()
            .filter(|m| m.visibility == Visibility::Public)
    }
}

/// Class/method introspection capability.
///
/// Implementations describe a controller's methods and their parameters in
/// declaration order. The reader relies on that order for its output.
pub trait Introspector {
    /// Describe `class`.
    ///
    /// # Errors
    ///
    /// [`ReaderError::UninspectableClass`] when the class is unknown or
    /// cannot be described.
    fn inspect(&self, class: &str) -> Result<ControllerSignature, ReaderError>;
}

impl<T: Introspector + ?Sized> Introspector for &T {
    fn inspect(&self, class: &str) -> Result<ControllerSignature, ReaderError> {
        (**self).inspect(class)
    }
}

impl<T: Introspector + ?Sized> Introspector for std::sync::Arc<T> {
    fn inspect(&self, class: &str) -> Result<ControllerSignature, ReaderError> {
        (**self).inspect(class)
    }
}
