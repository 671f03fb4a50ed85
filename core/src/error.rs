//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// The namespace (module identifier) could not be resolved.
    #[from(ignore)]
    #[display("Namespace not found: {_0}")]
    NamespaceNotFound(String),

    /// The namespace resolved, but declares no operation with this name.
    #[from(ignore)]
    #[display("Operation not found: {operation} in {namespace}")]
    OperationNotFound {
        /// Namespace that was searched.
        namespace: String,
        /// Operation name that had no match.
        operation: String,
    },

    /// A type tag reached a mapper that cannot handle it.
    #[from(ignore)]
    #[display("Mapping Error: {_0}")]
    Mapping(String),

    /// JSON serialization or parsing failure.
    #[display("Serialization Error: {_0}")]
    Serialization(serde_json::Error),

    /// Catalog or source text that could not be parsed.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
