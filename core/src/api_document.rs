#![deny(missing_docs)]

//! # API Document Assembly
//!
//! Aggregates per-operation request schemas/examples and a synthesized response
//! envelope into one document per module.
//!
//! Response envelopes follow a fixed convention independent of the declared
//! return shape: a `data`/`message` payload plus `success` and `timestamp`.

use crate::config::DocumentInfo;
use crate::descriptor::{HttpMapping, HttpMethod, ModuleDescriptor, OperationDescriptor};
use crate::error::AppResult;
use crate::schema_generator::{
    generate_example, generate_schema, to_pretty_json, ExampleDocument, SchemaDocument,
};
use crate::type_mapping::{JsonType, TypeTag};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error};

/// Label prefixed to diagnostics when module document assembly fails.
pub const API_DOC_FAILURE: &str = "API document generation failed";

/// Canned `data` example for string-returning endpoints.
pub const STRING_RESPONSE_EXAMPLE: &str =
    "Hello! I am a smart chat assistant, happy to help you!";

/// Canned `message` example for endpoints returning nothing.
pub const VOID_RESPONSE_EXAMPLE: &str = "Operation succeeded";

/// Fixed timestamp used in response examples.
pub const TIMESTAMP_EXAMPLE: &str = "2024-01-01T12:00:00Z";

/// Composite documentation for one module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocument {
    /// Dialect URI.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Always `object`.
    #[serde(rename = "type")]
    pub type_: JsonType,
    /// `<module> <suffix>`.
    pub title: String,
    /// Document description.
    pub description: String,
    /// Document version.
    pub version: String,
    /// Resolved module base path.
    pub base_path: String,
    /// Endpoints in declaration order.
    pub endpoints: Vec<EndpointDocument>,
}

/// Documentation for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDocument {
    /// Operation name.
    pub method_name: String,
    /// HTTP verb.
    pub http_method: HttpMethod,
    /// Base path joined with the operation path.
    pub path: String,
    /// Human description.
    pub description: String,
    /// Present only when the operation has parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_schema: Option<SchemaDocument>,
    /// Present only when the operation has parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_example: Option<ExampleDocument>,
    /// Response envelope schema.
    pub response_schema: ResponseSchema,
    /// Response envelope example.
    pub response_example: Map<String, Value>,
}

/// Schema of the response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    /// Dialect URI.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Always `object`.
    #[serde(rename = "type")]
    pub type_: JsonType,
    /// `<operation> response data`.
    pub title: String,
    /// Envelope fields.
    pub properties: IndexMap<String, ResponseProperty>,
    /// Always `success` and `timestamp`, plus `data` for string payloads.
    pub required: Vec<String>,
}

/// One field of the response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseProperty {
    /// JSON type name.
    #[serde(rename = "type")]
    pub type_: JsonType,
    /// Optional format (e.g. `date-time`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Field description.
    pub description: String,
    /// Optional example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl ResponseProperty {
    fn new(type_: JsonType, description: &str) -> Self {
        Self {
            type_,
            format: None,
            description: description.to_string(),
            example: None,
        }
    }

    fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
}

/// Resolves the base path of a module.
///
/// The first explicit value wins; otherwise `/` + the lower-cased module name
/// with every `controller` substring removed.
pub fn resolve_base_path(module: &ModuleDescriptor) -> String {
    match module.base_paths.first() {
        Some(path) => path.clone(),
        None => format!("/{}", module.name.to_lowercase().replace("controller", "")),
    }
}

/// Assembles the module document with default [`DocumentInfo`].
pub fn assemble_document(module: &ModuleDescriptor) -> AppResult<ApiDocument> {
    assemble_document_with(module, &DocumentInfo::default())
}

/// Assembles the module document.
///
/// Operations without HTTP metadata are excluded. Every `$schema` in the
/// document declares `info.dialect`.
pub fn assemble_document_with(
    module: &ModuleDescriptor,
    info: &DocumentInfo,
) -> AppResult<ApiDocument> {
    let base_path = resolve_base_path(module);

    let mut endpoints = Vec::new();
    for operation in &module.operations {
        let Some(mapping) = &operation.http else {
            debug!(
                module = %module.name,
                operation = %operation.name,
                "skipping operation without HTTP mapping"
            );
            continue;
        };
        endpoints.push(generate_endpoint(operation, mapping, &base_path, &info.dialect)?);
    }

    debug!(
        module = %module.name,
        base_path = %base_path,
        endpoints = endpoints.len(),
        "assembled API document"
    );

    Ok(ApiDocument {
        schema: info.dialect.clone(),
        type_: JsonType::Object,
        title: format!("{} {}", module.name, info.title_suffix),
        description: info.description.clone(),
        version: info.version.clone(),
        base_path,
        endpoints,
    })
}

/// Assembles and renders a module document; failures become a diagnostic string.
pub fn render_api_document(module: &ModuleDescriptor, info: &DocumentInfo) -> String {
    match assemble_document_with(module, info).and_then(|doc| to_pretty_json(&doc)) {
        Ok(json) => json,
        Err(e) => {
            error!(module = %module.name, error = %e, "API document generation failed");
            format!("{}: {}", API_DOC_FAILURE, e)
        }
    }
}

/// Only GET and POST routes contribute their declared path; PUT, DELETE and
/// path-less routes are documented at `/<operation>`.
fn operation_path(operation: &OperationDescriptor, mapping: &HttpMapping) -> String {
    match (mapping.method, &mapping.path) {
        (HttpMethod::Get | HttpMethod::Post, Some(path)) => path.clone(),
        _ => format!("/{}", operation.name),
    }
}

fn generate_endpoint(
    operation: &OperationDescriptor,
    mapping: &HttpMapping,
    base_path: &str,
    dialect: &str,
) -> AppResult<EndpointDocument> {
    let (request_schema, request_example) = if operation.parameters.is_empty() {
        (None, None)
    } else {
        let mut schema = generate_schema(operation)?;
        schema.schema = dialect.to_string();
        (Some(schema), Some(generate_example(operation)?))
    };

    Ok(EndpointDocument {
        method_name: operation.name.clone(),
        http_method: mapping.method,
        path: format!("{}{}", base_path, operation_path(operation, mapping)),
        description: operation
            .description
            .clone()
            .unwrap_or_else(|| format!("{} endpoint", operation.name)),
        request_schema,
        request_example,
        response_schema: response_schema(operation, dialect),
        response_example: response_example(operation.return_type),
    })
}

/// Builds the response envelope schema from the declared return type.
pub fn response_schema(operation: &OperationDescriptor, dialect: &str) -> ResponseSchema {
    let mut properties = IndexMap::new();

    match operation.return_type {
        TypeTag::String => {
            properties.insert(
                "data".to_string(),
                ResponseProperty::new(JsonType::String, "Chat response content")
                    .with_example(json!(STRING_RESPONSE_EXAMPLE)),
            );
        }
        TypeTag::Void => {
            properties.insert(
                "message".to_string(),
                ResponseProperty::new(JsonType::String, "Operation result message")
                    .with_example(json!(VOID_RESPONSE_EXAMPLE)),
            );
        }
        _ => {
            properties.insert(
                "data".to_string(),
                ResponseProperty::new(JsonType::Object, "Response data object"),
            );
        }
    }

    properties.insert(
        "success".to_string(),
        ResponseProperty::new(JsonType::Boolean, "Whether the request succeeded")
            .with_example(json!(true)),
    );
    properties.insert(
        "timestamp".to_string(),
        ResponseProperty::new(JsonType::String, "Response timestamp")
            .with_format("date-time")
            .with_example(json!(TIMESTAMP_EXAMPLE)),
    );

    let mut required = vec!["success".to_string(), "timestamp".to_string()];
    if operation.return_type == TypeTag::String {
        required.push("data".to_string());
    }

    ResponseSchema {
        schema: dialect.to_string(),
        type_: JsonType::Object,
        title: format!("{} response data", operation.name),
        properties,
        required,
    }
}

/// Builds the response envelope example from the declared return type.
pub fn response_example(return_type: TypeTag) -> Map<String, Value> {
    let mut example = Map::new();
    match return_type {
        TypeTag::String => {
            example.insert("data".to_string(), json!(STRING_RESPONSE_EXAMPLE));
        }
        TypeTag::Void => {
            example.insert("message".to_string(), json!(VOID_RESPONSE_EXAMPLE));
        }
        _ => {
            example.insert(
                "data".to_string(),
                json!({"id": "123", "name": "Sample data"}),
            );
        }
    }
    example.insert("success".to_string(), Value::Bool(true));
    example.insert("timestamp".to_string(), json!(TIMESTAMP_EXAMPLE));
    example
}
