#![deny(missing_docs)]

//! # Sigdoc Core
//!
//! Synthesizes JSON Schema documents, example payloads and composite API
//! documents from operation descriptors.

/// Shared error types.
pub mod error;

/// Operation, parameter and module descriptors.
pub mod descriptor;

/// Type classification and mapping logic (TypeTag -> JSON Schema).
pub mod type_mapping;

/// Canonical example literals.
pub mod example_values;

/// Per-operation schema and example generation.
pub mod schema_generator;

/// Namespace lookup and module catalogs.
pub mod registry;

/// Rust source discovery.
pub mod discovery;

/// Document settings.
pub mod config;

/// Module API document assembly.
pub mod api_document;

/// Static index document.
pub mod index_document;

/// String-returning presentation adapters.
pub mod adapters;

pub use api_document::{
    assemble_document, assemble_document_with, render_api_document, resolve_base_path,
    ApiDocument, EndpointDocument,
};
pub use config::DocumentInfo;
pub use descriptor::{
    HttpMapping, HttpMethod, ModuleDescriptor, OperationDescriptor, ParameterDescriptor,
};
pub use discovery::discover_module;
pub use error::{AppError, AppResult};
pub use example_values::example_for;
pub use index_document::IndexDocument;
pub use registry::{ModuleRegistry, OperationLookup};
pub use schema_generator::{
    generate_example, generate_example_json, generate_schema, generate_schema_json, resolve,
    ExampleDocument, SchemaDocument, JSON_SCHEMA_DIALECT,
};
pub use type_mapping::{map_type, JsonSchemaMapper, JsonType, PropertySchema, TypeMapper, TypeTag};
