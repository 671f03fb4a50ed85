#![deny(missing_docs)]

//! # Module Registry
//!
//! The lookup hook used for ad hoc `(namespace, operation)` requests.
//! Catalogs map fully qualified namespaces (e.g. `app.controller.HelloworldController`)
//! to module descriptors and can be loaded from YAML or JSON, or built from Rust
//! source through [`crate::discovery`].

use crate::descriptor::ModuleDescriptor;
use crate::discovery::discover_module;
use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Resolves a namespace to the module it names.
pub trait OperationLookup {
    /// Returns the module for `namespace`, or `NamespaceNotFound`.
    fn lookup(&self, namespace: &str) -> AppResult<&ModuleDescriptor>;
}

/// In-memory catalog of modules keyed by namespace, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRegistry {
    /// Namespace to module.
    #[serde(default)]
    pub modules: IndexMap<String, ModuleDescriptor>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module, replacing any previous one under the same namespace.
    ///
    /// An empty module name is derived from the last `.` segment of the namespace.
    pub fn insert(&mut self, namespace: impl Into<String>, mut module: ModuleDescriptor) {
        let namespace = namespace.into();
        if module.name.is_empty() {
            module.name = simple_name(&namespace).to_string();
        }
        self.modules.insert(namespace, module);
    }

    /// Builder form of [`ModuleRegistry::insert`].
    pub fn with_module(mut self, namespace: impl Into<String>, module: ModuleDescriptor) -> Self {
        self.insert(namespace, module);
        self
    }

    /// Discovers `type_name` in Rust `source` and registers it under `namespace`.
    pub fn register_source(
        &mut self,
        namespace: impl Into<String>,
        source: &str,
        type_name: &str,
    ) -> AppResult<()> {
        let module = discover_module(source, type_name)?;
        self.insert(namespace, module);
        Ok(())
    }

    /// Parses a YAML catalog.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let parsed: ModuleRegistry = serde_yaml::from_str(content)
            .map_err(|e| AppError::Parse(format!("Failed to parse catalog YAML: {}", e)))?;
        Ok(parsed.normalized())
    }

    /// Parses a JSON catalog.
    pub fn from_json_str(content: &str) -> AppResult<Self> {
        let parsed: ModuleRegistry = serde_json::from_str(content)
            .map_err(|e| AppError::Parse(format!("Failed to parse catalog JSON: {}", e)))?;
        Ok(parsed.normalized())
    }

    /// Loads a catalog file. `.json` is read as JSON, anything else as YAML.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::General(format!(
                "Catalog file not found: {:?}",
                path
            )));
        }
        let content = fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
        let registry = match ext {
            "json" => Self::from_json_str(&content)?,
            _ => Self::from_yaml_str(&content)?,
        };
        debug!(path = ?path, modules = registry.len(), "loaded module catalog");
        Ok(registry)
    }

    /// Registered namespaces, in insertion order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no module is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn normalized(self) -> Self {
        let mut out = ModuleRegistry::new();
        for (namespace, module) in self.modules {
            out.insert(namespace, module);
        }
        out
    }
}

impl OperationLookup for ModuleRegistry {
    fn lookup(&self, namespace: &str) -> AppResult<&ModuleDescriptor> {
        self.modules
            .get(namespace)
            .ok_or_else(|| AppError::NamespaceNotFound(namespace.to_string()))
    }
}

fn simple_name(namespace: &str) -> &str {
    namespace.rsplit('.').next().unwrap_or(namespace)
}
