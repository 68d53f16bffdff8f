use super::types::{ControllerSignature, Introspector};
use crate::error::ReaderError;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// In-memory introspector backed by declared controller signatures.
///
/// Built in code with [`StaticIntrospector::with_controller`] or loaded from a
/// manifest file with [`load_manifest`]. Class lookups ignore a leading `\`.
#[derive(Debug, Clone, Default)]
pub struct StaticIntrospector {
    controllers: HashMap<String, ControllerSignature>,
    order: Vec<String>,
}

impl StaticIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `controller`, replacing any earlier signature for the same class.
    pub fn with_controller(mut self, controller: ControllerSignature) -> Self {
        self.insert(controller);
        self
    }

    pub fn insert(&mut self, controller: ControllerSignature) {
        let key = controller.qualified_name().to_string();
        if self.controllers.insert(key.clone(), controller).is_none() {
            self.order.push(key);
        } else {
            debug!(class = %key, "Replacing controller signature");
        }
    }

    /// Registered class names in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Introspector for StaticIntrospector {
    fn inspect(&self, class: &str) -> Result<ControllerSignature, ReaderError> {
        self.controllers
            .get(class.trim_start_matches('\\'))
            .cloned()
            .ok_or_else(|| ReaderError::uninspectable(class, "class is not registered"))
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    controllers: Vec<ControllerSignature>,
}

/// Load controller signatures from a YAML (`.yaml`/`.yml`) or JSON manifest.
///
/// ```yaml
/// controllers:
///   - class: App\Controllers\Blog
///     methods:
///       - name: getShow
///         params:
///           - { name: slug }
///           - { name: page, has_default: true }
/// ```
pub fn load_manifest(file_path: &Path) -> anyhow::Result<StaticIntrospector> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("reading controller manifest {}", file_path.display()))?;
    let manifest: Manifest = match file_path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };

    let introspector = manifest
        .controllers
        .into_iter()
        .fold(StaticIntrospector::new(), StaticIntrospector::with_controller);

    info!(
        manifest = %file_path.display(),
        controllers = introspector.len(),
        "Controller manifest loaded"
    );
    Ok(introspector)
}
