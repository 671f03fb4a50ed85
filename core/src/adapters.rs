#![deny(missing_docs)]

//! # Presentation Adapters
//!
//! String-in/string-out entry points for a documentation service. Every function
//! returns either pretty JSON or a plain-text diagnostic of the form
//! `"<label>: <message>"`; none of them return an error or panic.

use crate::api_document::{render_api_document, API_DOC_FAILURE};
use crate::config::DocumentInfo;
use crate::error::{AppError, AppResult};
use crate::index_document::{IndexDocument, INDEX_FAILURE};
use crate::registry::OperationLookup;
use crate::schema_generator::{
    generate_example, generate_example_json, generate_schema, generate_schema_for, resolve,
    to_pretty_json,
};
use serde_json::{Map, Value};
use tracing::warn;

/// Label for schema lookups.
pub const SCHEMA_FAILURE: &str = "Schema generation failed";
/// Label for example lookups.
pub const EXAMPLE_FAILURE: &str = "Example generation failed";
/// Label for combined schema + example lookups.
pub const METHOD_INFO_FAILURE: &str = "Method info lookup failed";

fn diagnose(label: &str, result: AppResult<String>) -> String {
    result.unwrap_or_else(|e| failure(label, &e))
}

fn failure(label: &str, error: &AppError) -> String {
    warn!(label, error = %error, "returning diagnostic");
    format!("{}: {}", label, error)
}

/// Parameter schema of `namespace::operation`.
pub fn schema_for<L: OperationLookup + ?Sized>(
    lookup: &L,
    namespace: &str,
    operation: &str,
) -> String {
    diagnose(SCHEMA_FAILURE, generate_schema_for(lookup, namespace, operation))
}

/// Example request of `namespace::operation`.
pub fn example_for<L: OperationLookup + ?Sized>(
    lookup: &L,
    namespace: &str,
    operation: &str,
) -> String {
    let result = resolve(lookup, namespace, operation).and_then(generate_example_json);
    diagnose(EXAMPLE_FAILURE, result)
}

/// Schema and example of `namespace::operation` in one object.
pub fn complete_method_info<L: OperationLookup + ?Sized>(
    lookup: &L,
    namespace: &str,
    operation: &str,
) -> String {
    let result = resolve(lookup, namespace, operation).and_then(|op| {
        let mut info = Map::new();
        info.insert("methodName".into(), Value::String(operation.to_string()));
        info.insert("className".into(), Value::String(namespace.to_string()));
        info.insert("schema".into(), serde_json::to_value(generate_schema(op)?)?);
        info.insert("example".into(), Value::Object(generate_example(op)?));
        to_pretty_json(&info)
    });
    diagnose(METHOD_INFO_FAILURE, result)
}

/// API document of the module registered under `namespace`.
pub fn api_doc_for_module<L: OperationLookup + ?Sized>(
    lookup: &L,
    namespace: &str,
    info: &DocumentInfo,
) -> String {
    match lookup.lookup(namespace) {
        Ok(module) => render_api_document(module, info),
        Err(e) => failure(API_DOC_FAILURE, &e),
    }
}

/// API document of `<package>.<simple_name>`.
///
/// An unknown controller yields `Controller not found: <simple_name>`.
pub fn api_doc_for_controller<L: OperationLookup + ?Sized>(
    lookup: &L,
    package: &str,
    simple_name: &str,
    info: &DocumentInfo,
) -> String {
    let namespace = format!("{}.{}", package, simple_name);
    match lookup.lookup(&namespace) {
        Ok(module) => render_api_document(module, info),
        Err(AppError::NamespaceNotFound(_)) => {
            warn!(namespace = %namespace, "controller not found");
            format!("Controller not found: {}", simple_name)
        }
        Err(e) => failure(API_DOC_FAILURE, &e),
    }
}

/// The fixed index document.
pub fn api_doc_index(info: &DocumentInfo) -> String {
    diagnose(INDEX_FAILURE, IndexDocument::reference(info).to_json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ModuleDescriptor, OperationDescriptor, ParameterDescriptor};
    use crate::registry::ModuleRegistry;
    use crate::type_mapping::TypeTag;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    const PACKAGE: &str = "app.controller";

    fn registry() -> ModuleRegistry {
        ModuleRegistry::new().with_module(
            "app.controller.HelloworldController",
            ModuleDescriptor::new("HelloworldController").with_operation(
                OperationDescriptor::new("simpleChat")
                    .get("/simple/chat")
                    .param(ParameterDescriptor::new("query", TypeTag::String))
                    .returns(TypeTag::String),
            ),
        )
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Runs `f` under a warn-level subscriber, returning its output and the log text.
    fn with_warnings(f: impl FnOnce() -> String) -> (String, String) {
        let sink = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        (out, logs)
    }

    #[test]
    fn test_schema_for_success() {
        let out = schema_for(&registry(), "app.controller.HelloworldController", "simpleChat");
        assert!(out.contains("\"query\""));
        assert!(out.contains("\"type\": \"string\""));
    }

    #[test]
    fn test_schema_for_missing_operation() {
        let out = schema_for(&registry(), "app.controller.HelloworldController", "nonExistent");
        assert_eq!(
            out,
            "Schema generation failed: Operation not found: nonExistent in app.controller.HelloworldController"
        );
    }

    #[test]
    fn test_schema_for_missing_namespace() {
        let out = schema_for(&registry(), "app.NonExistent", "someMethod");
        assert_eq!(out, "Schema generation failed: Namespace not found: app.NonExistent");
    }

    #[test]
    fn test_example_for() {
        let out = example_for(&registry(), "app.controller.HelloworldController", "simpleChat");
        assert!(out.contains("example string"));
        let missing = example_for(&registry(), "x.Y", "z");
        assert!(missing.starts_with("Example generation failed: "));
    }

    #[test]
    fn test_example_for_duplicate_parameter() {
        let reg = ModuleRegistry::new().with_module(
            "app.controller.DupController",
            ModuleDescriptor::new("DupController").with_operation(
                OperationDescriptor::new("dup")
                    .param(ParameterDescriptor::new("x", TypeTag::String))
                    .param(ParameterDescriptor::new("x", TypeTag::Integer)),
            ),
        );
        let out = example_for(&reg, "app.controller.DupController", "dup");
        assert_eq!(
            out,
            "Example generation failed: Mapping Error: Duplicate parameter 'x' in operation 'dup'"
        );
    }

    #[test]
    fn test_complete_method_info() {
        let out = complete_method_info(
            &registry(),
            "app.controller.HelloworldController",
            "simpleChat",
        );
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["methodName"], "simpleChat");
        assert_eq!(value["className"], "app.controller.HelloworldController");
        assert_eq!(value["schema"]["required"][0], "query");
        assert_eq!(value["example"]["query"], "example string");
    }

    #[test]
    fn test_api_doc_for_controller() {
        let info = DocumentInfo::default();
        let out = api_doc_for_controller(&registry(), PACKAGE, "HelloworldController", &info);
        assert!(out.contains("\"basePath\": \"/helloworld\""));

        let missing = api_doc_for_controller(&registry(), PACKAGE, "GhostController", &info);
        assert_eq!(missing, "Controller not found: GhostController");
    }

    #[test]
    fn test_api_doc_for_module_unknown() {
        let out = api_doc_for_module(&registry(), "nope.Nope", &DocumentInfo::default());
        assert_eq!(out, "API document generation failed: Namespace not found: nope.Nope");
    }

    #[test]
    fn test_lookup_failures_are_logged() {
        let info = DocumentInfo::default();

        let (out, logs) = with_warnings(|| api_doc_for_module(&registry(), "nope.Nope", &info));
        assert_eq!(out, "API document generation failed: Namespace not found: nope.Nope");
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Namespace not found: nope.Nope"));

        let (out, logs) = with_warnings(|| {
            api_doc_for_controller(&registry(), PACKAGE, "GhostController", &info)
        });
        assert_eq!(out, "Controller not found: GhostController");
        assert!(logs.contains("controller not found"));
        assert!(logs.contains("app.controller.GhostController"));

        let (_, logs) = with_warnings(|| {
            api_doc_for_controller(&registry(), PACKAGE, "HelloworldController", &info)
        });
        assert!(logs.is_empty());
    }

    #[test]
    fn test_index() {
        let out = api_doc_index(&DocumentInfo::default());
        assert!(out.contains("\"controllers\""));
        assert!(out.contains("/api-docs/index"));
    }
}
