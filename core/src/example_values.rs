//! # Example Values
//!
//! Fixed, deterministic example literals per [`TypeTag`]. No randomisation and
//! no attempt at semantically meaningful samples.

use crate::error::{AppError, AppResult};
use crate::type_mapping::TypeTag;
use serde_json::{json, Map, Value};

/// Placeholder used for every string-typed example.
pub const STRING_PLACEHOLDER: &str = "example string";

/// Returns the canonical example literal for a value tag.
pub fn example_for(tag: TypeTag) -> AppResult<Value> {
    match tag {
        TypeTag::String => Ok(Value::String(STRING_PLACEHOLDER.to_string())),
        TypeTag::Integer => Ok(json!(123_i32)),
        TypeTag::Long => Ok(json!(123_i64)),
        TypeTag::Float | TypeTag::Double => Ok(json!(123.45)),
        TypeTag::Boolean => Ok(Value::Bool(true)),
        TypeTag::Array => Ok(Value::Array(Vec::new())),
        TypeTag::Map | TypeTag::Object => Ok(Value::Object(Map::new())),
        TypeTag::Void => Err(AppError::Mapping(
            "'void' has no example value".into(),
        )),
    }
}
