#![deny(missing_docs)]

//! # Descriptors
//!
//! Plain-data records describing documented operations, as handed over by a
//! discovery collaborator. The generators only ever borrow these.

use crate::type_mapping::TypeTag;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// HTTP verbs recognised as endpoint metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Maps a routing attribute name (`get`, `post`, ...) to its verb.
    pub fn from_attribute(name: &str) -> Option<Self> {
        match name {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            _ => None,
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HTTP routing metadata attached to an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpMapping {
    /// The verb.
    pub method: HttpMethod,
    /// Declared sub-path. `None` means the route was declared without a path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// One parameter of an operation signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    /// Parameter name.
    pub name: String,
    /// Classified type.
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    /// True only when the parameter carried an explicit nullable marker.
    #[serde(default)]
    pub is_optional: bool,
    /// Declared source type, when known (e.g. `Vec<u64>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
}

impl ParameterDescriptor {
    /// Creates a required parameter.
    pub fn new(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            type_tag,
            is_optional: false,
            declared_type: None,
        }
    }

    /// Marks the parameter as nullable.
    pub fn nullable(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Records the declared source type.
    pub fn with_declared_type(mut self, declared: impl Into<String>) -> Self {
        self.declared_type = Some(declared.into());
        self
    }

    /// Type name shown in schema descriptions.
    pub fn type_name(&self) -> &str {
        self.declared_type
            .as_deref()
            .unwrap_or(self.type_tag.source_name())
    }
}

fn void() -> TypeTag {
    TypeTag::Void
}

/// Static record of one documented callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    /// Operation (method) name.
    pub name: String,
    /// Routing metadata; operations without it are not endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpMapping>,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    /// Classified return type.
    #[serde(default = "void")]
    pub return_type: TypeTag,
    /// Optional human description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OperationDescriptor {
    /// Creates an operation with no parameters, no routing and a `void` return.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            http: None,
            parameters: Vec::new(),
            return_type: TypeTag::Void,
            description: None,
        }
    }

    /// Attaches routing metadata.
    pub fn with_mapping(mut self, method: HttpMethod, path: Option<&str>) -> Self {
        self.http = Some(HttpMapping {
            method,
            path: path.map(str::to_string),
        });
        self
    }

    /// Shorthand for a `GET` route.
    pub fn get(self, path: &str) -> Self {
        self.with_mapping(HttpMethod::Get, Some(path))
    }

    /// Shorthand for a `POST` route.
    pub fn post(self, path: &str) -> Self {
        self.with_mapping(HttpMethod::Post, Some(path))
    }

    /// Shorthand for a `PUT` route.
    pub fn put(self, path: &str) -> Self {
        self.with_mapping(HttpMethod::Put, Some(path))
    }

    /// Shorthand for a `DELETE` route.
    pub fn delete(self, path: &str) -> Self {
        self.with_mapping(HttpMethod::Delete, Some(path))
    }

    /// Appends a parameter.
    pub fn param(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the return type.
    pub fn returns(mut self, tag: TypeTag) -> Self {
        self.return_type = tag;
        self
    }

    /// Sets a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Names of non-optional parameters, in declaration order.
    pub fn required_names(&self) -> Vec<String> {
        self.parameters
            .iter()
            .filter(|p| !p.is_optional)
            .map(|p| p.name.clone())
            .collect()
    }
}

/// A named grouping of operations, documented as one API document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    /// Simple module name, e.g. `HelloworldController`.
    #[serde(default)]
    pub name: String,
    /// Values of an explicit base-path declaration; the first one wins.
    #[serde(default)]
    pub base_paths: Vec<String>,
    /// Optional human description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operations in declaration order.
    #[serde(default)]
    pub operations: Vec<OperationDescriptor>,
}

impl ModuleDescriptor {
    /// Creates an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an explicit base path value.
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_paths.push(path.into());
        self
    }

    /// Sets a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends an operation.
    pub fn with_operation(mut self, operation: OperationDescriptor) -> Self {
        self.operations.push(operation);
        self
    }

    /// First declared operation with this exact name.
    pub fn operation(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations.iter().find(|op| op.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_attribute_names() {
        assert_eq!(HttpMethod::from_attribute("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_attribute("delete"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::from_attribute("patch"), None);
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_type_name_falls_back_to_tag() {
        let p = ParameterDescriptor::new("count", TypeTag::Integer);
        assert_eq!(p.type_name(), "i32");
        let p = p.with_declared_type("u16");
        assert_eq!(p.type_name(), "u16");
    }

    #[test]
    fn test_required_names_keep_order() {
        let op = OperationDescriptor::new("search")
            .param(ParameterDescriptor::new("q", TypeTag::String))
            .param(ParameterDescriptor::new("page", TypeTag::Integer).nullable())
            .param(ParameterDescriptor::new("limit", TypeTag::Integer));
        assert_eq!(op.required_names(), vec!["q", "limit"]);
    }

    #[test]
    fn test_operation_lookup_prefers_first() {
        let module = ModuleDescriptor::new("M")
            .with_operation(OperationDescriptor::new("run").returns(TypeTag::String))
            .with_operation(OperationDescriptor::new("run").returns(TypeTag::Long));
        assert_eq!(module.operation("run").unwrap().return_type, TypeTag::String);
        assert!(module.operation("walk").is_none());
    }

    #[test]
    fn test_operation_deserialize_defaults() {
        let op: OperationDescriptor = serde_json::from_str(r#"{"name": "ping"}"#).unwrap();
        assert_eq!(op.return_type, TypeTag::Void);
        assert!(op.http.is_none());
        assert!(op.parameters.is_empty());
    }
}
