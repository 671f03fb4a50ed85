#![deny(missing_docs)]

//! # Document Settings
//!
//! Metadata stamped onto assembled API and index documents. Defaults reproduce
//! the fixed values every document carries; a YAML file can override them.

use crate::error::{AppError, AppResult};
use crate::schema_generator::JSON_SCHEMA_DIALECT;
use serde::{Deserialize, Serialize};

/// Document-level metadata for generated API documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Version string written to every document.
    pub version: String,
    /// Appended to the module name to form the document title.
    pub title_suffix: String,
    /// Description of module documents.
    pub description: String,
    /// Server root advertised by the index document.
    pub base_url: String,
    /// Mount point of the documentation endpoints, used for index `docUrl`s.
    pub docs_path: String,
    /// `$schema` URI declared by assembled and index documents.
    pub dialect: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            title_suffix: "API Documentation".to_string(),
            description: "JSON Schema based API documentation".to_string(),
            base_url: "http://localhost:8080".to_string(),
            docs_path: "/api-docs".to_string(),
            dialect: JSON_SCHEMA_DIALECT.to_string(),
        }
    }
}

impl DocumentInfo {
    /// Sets the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the title suffix.
    pub fn with_title_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.title_suffix = suffix.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the advertised server root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the documentation mount point.
    pub fn with_docs_path(mut self, docs_path: impl Into<String>) -> Self {
        self.docs_path = docs_path.into();
        self
    }

    /// Sets the `$schema` dialect URI.
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = dialect.into();
        self
    }

    /// Parses settings from YAML; missing keys keep their defaults.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Parse(format!("Failed to parse document settings: {}", e)))
    }
}
