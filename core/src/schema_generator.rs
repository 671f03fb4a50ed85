#![deny(missing_docs)]

//! # Schema Generator
//!
//! Builds the parameter schema document and the example request document for
//! a single operation, and resolves operations by `(namespace, name)`.

use crate::descriptor::OperationDescriptor;
use crate::error::{AppError, AppResult};
use crate::example_values::example_for;
use crate::registry::OperationLookup;
use crate::type_mapping::{JsonSchemaMapper, JsonType, PropertySchema, TypeMapper};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Dialect URI declared by every generated document.
pub const JSON_SCHEMA_DIALECT: &str = "http://json-schema.org/draft-07/schema#";

/// JSON Schema describing the input parameters of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    /// Dialect URI.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Always `object`.
    #[serde(rename = "type")]
    pub type_: JsonType,
    /// Document title.
    pub title: String,
    /// Document description.
    pub description: String,
    /// One property per parameter, in declaration order.
    pub properties: IndexMap<String, PropertySchema>,
    /// Non-optional parameter names. Omitted, not empty, when there are none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

/// Example request: parameter name to literal, in declaration order.
pub type ExampleDocument = Map<String, Value>;

/// Generates the parameter schema with the standard mapper.
pub fn generate_schema(operation: &OperationDescriptor) -> AppResult<SchemaDocument> {
    generate_schema_with(operation, &JsonSchemaMapper)
}

/// Generates the parameter schema with a caller-supplied mapper.
pub fn generate_schema_with<M: TypeMapper + ?Sized>(
    operation: &OperationDescriptor,
    mapper: &M,
) -> AppResult<SchemaDocument> {
    let mut properties = IndexMap::with_capacity(operation.parameters.len());
    let mut required = Vec::new();

    for parameter in &operation.parameters {
        let property = mapper.map_type(parameter)?;
        if properties.insert(parameter.name.clone(), property).is_some() {
            return Err(duplicate_parameter(operation, &parameter.name));
        }
        if !parameter.is_optional {
            required.push(parameter.name.clone());
        }
    }

    debug!(
        operation = %operation.name,
        properties = properties.len(),
        required = required.len(),
        "generated parameter schema"
    );

    Ok(SchemaDocument {
        schema: JSON_SCHEMA_DIALECT.to_string(),
        type_: JsonType::Object,
        title: format!("{} parameter schema", operation.name),
        description: format!(
            "Auto-generated JSON Schema for the parameters of {}",
            operation.name
        ),
        properties,
        required: if required.is_empty() {
            None
        } else {
            Some(required)
        },
    })
}

/// Generates the example request document.
pub fn generate_example(operation: &OperationDescriptor) -> AppResult<ExampleDocument> {
    let mut example = Map::new();
    for parameter in &operation.parameters {
        let value = example_for(parameter.type_tag)?;
        if example.insert(parameter.name.clone(), value).is_some() {
            return Err(duplicate_parameter(operation, &parameter.name));
        }
    }
    Ok(example)
}

fn duplicate_parameter(operation: &OperationDescriptor, name: &str) -> AppError {
    AppError::Mapping(format!(
        "Duplicate parameter '{}' in operation '{}'",
        name, operation.name
    ))
}

/// Finds the first operation named `operation` in `namespace`.
///
/// Overloads are not distinguished: the first declared match wins.
pub fn resolve<'a, L: OperationLookup + ?Sized>(
    lookup: &'a L,
    namespace: &str,
    operation: &str,
) -> AppResult<&'a OperationDescriptor> {
    let module = lookup.lookup(namespace)?;
    module
        .operation(operation)
        .ok_or_else(|| AppError::OperationNotFound {
            namespace: namespace.to_string(),
            operation: operation.to_string(),
        })
}

/// Pretty-prints any document with two-space indentation.
pub fn to_pretty_json<T: Serialize + ?Sized>(document: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// [`generate_schema`] rendered as pretty JSON.
pub fn generate_schema_json(operation: &OperationDescriptor) -> AppResult<String> {
    to_pretty_json(&generate_schema(operation)?)
}

/// [`generate_example`] rendered as pretty JSON.
pub fn generate_example_json(operation: &OperationDescriptor) -> AppResult<String> {
    to_pretty_json(&generate_example(operation)?)
}

/// Resolves then renders the parameter schema of `namespace::operation`.
pub fn generate_schema_for<L: OperationLookup + ?Sized>(
    lookup: &L,
    namespace: &str,
    operation: &str,
) -> AppResult<String> {
    generate_schema_json(resolve(lookup, namespace, operation)?)
}
