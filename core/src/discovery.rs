#![deny(missing_docs)]

//! # Source Discovery
//!
//! Builds a [`ModuleDescriptor`] from Rust source using the rust-analyzer syntax library.
//!
//! Recognised shapes:
//!
//! ```text
//! /// Chat endpoints.
//! #[request_mapping("/helloworld")]
//! struct HelloworldController;
//!
//! impl HelloworldController {
//!     #[get("/simple/chat")]
//!     fn simple_chat(&self, #[nullable] query: String) -> String { .. }
//! }
//! ```

use crate::descriptor::{
    HttpMapping, HttpMethod, ModuleDescriptor, OperationDescriptor, ParameterDescriptor,
};
use crate::error::{AppError, AppResult};
use crate::type_mapping::{classify_ast_type, TypeTag};
use ra_ap_edition::Edition;
use ra_ap_syntax::ast::{self, HasName};
use ra_ap_syntax::{AstNode, SourceFile, SyntaxKind, SyntaxNode};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Attribute carrying explicit base paths on the module type.
pub const BASE_PATH_ATTRIBUTE: &str = "request_mapping";

/// Parses `code` and extracts the module named `type_name` with all its inherent methods.
pub fn discover_module(code: &str, type_name: &str) -> AppResult<ModuleDescriptor> {
    let parse = SourceFile::parse(code, Edition::Edition2021);
    let file = parse.tree();

    let type_node = file
        .syntax()
        .descendants()
        .find(|node| declared_name(node).is_some_and(|n| n == type_name))
        .ok_or_else(|| AppError::Parse(format!("Type '{}' not found", type_name)))?;

    let mut module = ModuleDescriptor::new(type_name);
    module.description = extract_doc_comment(&type_node);
    module.base_paths = attributes(&type_node)
        .filter(|attr| attr_name(attr).as_deref() == Some(BASE_PATH_ATTRIBUTE))
        .flat_map(|attr| string_literals(&attr_args(&attr)))
        .collect();

    for impl_block in file.syntax().descendants().filter_map(ast::Impl::cast) {
        if impl_block.trait_().is_some() {
            continue;
        }
        let is_target = impl_block
            .self_ty()
            .is_some_and(|ty| ty.syntax().text().to_string().trim() == type_name);
        if !is_target {
            continue;
        }
        let Some(items) = impl_block.assoc_item_list() else {
            continue;
        };
        for item in items.assoc_items() {
            if let ast::AssocItem::Fn(func) = item {
                if let Some(op) = parse_fn(&func)? {
                    module.operations.push(op);
                }
            }
        }
    }

    debug!(
        module = %module.name,
        operations = module.operations.len(),
        "discovered module from source"
    );

    Ok(module)
}

fn declared_name(node: &SyntaxNode) -> Option<String> {
    if let Some(s) = ast::Struct::cast(node.clone()) {
        return s.name().map(|n| n.text().to_string());
    }
    if let Some(e) = ast::Enum::cast(node.clone()) {
        return e.name().map(|n| n.text().to_string());
    }
    None
}

fn parse_fn(func: &ast::Fn) -> AppResult<Option<OperationDescriptor>> {
    let Some(name) = func.name() else {
        return Ok(None);
    };
    let mut op = OperationDescriptor::new(name.text().to_string());
    op.description = extract_doc_comment(func.syntax());
    op.http = http_mapping(func.syntax());

    if let Some(params) = func.param_list() {
        for param in params.params() {
            let Some(ty) = param.ty() else {
                continue;
            };
            let param_name = match param.pat() {
                Some(ast::Pat::IdentPat(ident)) => ident
                    .name()
                    .map(|n| n.text().to_string())
                    .ok_or_else(|| AppError::Parse("Parameter without a name".into()))?,
                Some(other) => {
                    warn!(
                        operation = %op.name,
                        pattern = %other.syntax().text(),
                        "destructured parameter documented by its pattern text"
                    );
                    other.syntax().text().to_string()
                }
                None => continue,
            };

            let mut descriptor = ParameterDescriptor::new(param_name, classify_ast_type(&ty))
                .with_declared_type(ty.syntax().text().to_string());
            descriptor.is_optional = first_attribute_is_nullable(param.syntax());
            op.parameters.push(descriptor);
        }
    }

    op.return_type = func
        .ret_type()
        .and_then(|ret| ret.ty())
        .map(|ty| classify_ast_type(&ty))
        .unwrap_or(TypeTag::Void);

    Ok(Some(op))
}

/// Only the first attribute is inspected; a nullable marker in second position is ignored.
fn first_attribute_is_nullable(node: &SyntaxNode) -> bool {
    attributes(node)
        .next()
        .and_then(|attr| attr_name(&attr))
        .is_some_and(|name| name.to_ascii_lowercase().contains("nullable"))
}

fn http_mapping(node: &SyntaxNode) -> Option<HttpMapping> {
    attributes(node).find_map(|attr| {
        let method = HttpMethod::from_attribute(&attr_name(&attr)?)?;
        let path = string_literals(&attr_args(&attr)).into_iter().next();
        Some(HttpMapping { method, path })
    })
}

fn attributes(node: &SyntaxNode) -> impl Iterator<Item = ast::Attr> {
    node.children().filter_map(ast::Attr::cast)
}

/// Last path segment of an attribute (`actix_web::get` -> `get`).
fn attr_name(attr: &ast::Attr) -> Option<String> {
    let segment = attr.meta()?.path()?.segment()?;
    Some(segment.name_ref()?.text().to_string())
}

fn attr_args(attr: &ast::Attr) -> String {
    attr.meta()
        .and_then(|meta| meta.token_tree())
        .map(|tt| tt.syntax().text().to_string())
        .unwrap_or_default()
}

fn string_literals(content: &str) -> Vec<String> {
    static LITERAL_RE: OnceLock<Regex> = OnceLock::new();
    let literal_re = LITERAL_RE
        .get_or_init(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).expect("Invalid regex"));

    literal_re
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Helper to extract `///` comments from a syntax node's trivia children.
fn extract_doc_comment(node: &SyntaxNode) -> Option<String> {
    let lines: Vec<String> = node
        .children_with_tokens()
        .filter(|child| child.kind() == SyntaxKind::COMMENT)
        .filter_map(|child| {
            let text = child.to_string();
            text.strip_prefix("///")
                .map(|content| content.strip_prefix(' ').unwrap_or(content).to_owned())
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n").trim().to_string())
    }
}
