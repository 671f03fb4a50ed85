#![deny(missing_docs)]

//! # Index Document
//!
//! A fixed summary of the documented modules and their endpoints. It is a
//! reference listing, maintained by hand rather than derived from live
//! [`crate::api_document::ApiDocument`]s.

use crate::config::DocumentInfo;
use crate::descriptor::HttpMethod;
use crate::error::AppResult;
use crate::schema_generator::to_pretty_json;
use crate::type_mapping::JsonType;
use serde::Serialize;

/// Label prefixed to diagnostics when index rendering fails.
pub const INDEX_FAILURE: &str = "API document index generation failed";

/// Top-level index document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    #[serde(rename = "$schema")]
    schema: String,
    #[serde(rename = "type")]
    type_: JsonType,
    title: String,
    description: String,
    version: String,
    base_url: String,
    /// Listed modules.
    pub controllers: Vec<IndexedModule>,
}

/// One module entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedModule {
    /// Module name.
    pub name: String,
    /// Module summary.
    pub description: String,
    /// Module base path.
    pub base_path: String,
    /// Where the module document is served.
    pub doc_url: String,
    /// Listed endpoints.
    pub endpoints: Vec<IndexedEndpoint>,
}

/// One endpoint entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedEndpoint {
    /// Operation name.
    pub name: String,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Full path.
    pub path: String,
    /// Endpoint summary.
    pub description: String,
}

type EndpointRow = (&'static str, &'static str, &'static str);

// (name, description, base path, doc slug, endpoints)
const MODULES: &[(&str, &str, &str, &str, &[EndpointRow])] = &[
    (
        "HelloworldController",
        "Smart chat controller",
        "/helloworld",
        "helloworld",
        &[("simpleChat", "/simple/chat", "Simple chat endpoint")],
    ),
    (
        "SchemaController",
        "JSON Schema generation controller",
        "/schema",
        "schema",
        &[
            (
                "generateSimpleChatSchema",
                "/simplechat",
                "Generate the JSON Schema of simpleChat",
            ),
            (
                "generateSimpleChatExample",
                "/simplechat/example",
                "Generate the example JSON of simpleChat",
            ),
        ],
    ),
    (
        "ApiDocController",
        "API document generation controller",
        "/api-docs",
        "api-docs",
        &[
            (
                "generateHelloworldApiDoc",
                "/helloworld",
                "Generate the HelloworldController API document",
            ),
            ("generateApiDocIndex", "/index", "Generate the API document index"),
        ],
    ),
];

impl IndexDocument {
    /// The reference index, stamped with `info`.
    pub fn reference(info: &DocumentInfo) -> Self {
        let controllers = MODULES
            .iter()
            .map(|(name, description, base_path, slug, endpoints)| IndexedModule {
                name: name.to_string(),
                description: description.to_string(),
                base_path: base_path.to_string(),
                doc_url: format!("{}/{}", info.docs_path, slug),
                endpoints: endpoints
                    .iter()
                    .map(|(op, path, summary)| IndexedEndpoint {
                        name: op.to_string(),
                        method: HttpMethod::Get,
                        path: format!("{}{}", base_path, path),
                        description: summary.to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            schema: info.dialect.clone(),
            type_: JsonType::Object,
            title: "API Documentation Index".to_string(),
            description: "API documentation index of the sigdoc service".to_string(),
            version: info.version.clone(),
            base_url: info.base_url.clone(),
            controllers,
        }
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> AppResult<String> {
        to_pretty_json(self)
    }
}
