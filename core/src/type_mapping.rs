#![deny(missing_docs)]

//! # Type Mapping
//!
//! Classifies declared parameter/return types into a closed set of [`TypeTag`]s
//! and maps each tag to a flat JSON Schema property with type-specific bounds.
//! User-defined types are never expanded: they collapse to `object`.

use crate::descriptor::ParameterDescriptor;
use crate::error::{AppError, AppResult};
// Import HasGenericArgs to access .generic_arg_list() on PathSegments
use ra_ap_edition::Edition;
use ra_ap_syntax::ast::{self, HasGenericArgs};
use ra_ap_syntax::{AstNode, SourceFile};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt::Display;

/// Closed classification of a parameter or return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Text.
    String,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Boolean.
    Boolean,
    /// Any sequence type.
    Array,
    /// Any key/value map type.
    Map,
    /// Everything else, including user-defined structs.
    Object,
    /// No value. Only meaningful as a return type.
    Void,
}

impl TypeTag {
    /// Every tag that can describe a parameter value.
    pub const VALUES: [TypeTag; 9] = [
        TypeTag::String,
        TypeTag::Integer,
        TypeTag::Long,
        TypeTag::Float,
        TypeTag::Double,
        TypeTag::Boolean,
        TypeTag::Array,
        TypeTag::Map,
        TypeTag::Object,
    ];

    /// Canonical Rust spelling used when a descriptor carries no declared type name.
    pub fn source_name(self) -> &'static str {
        match self {
            TypeTag::String => "String",
            TypeTag::Integer => "i32",
            TypeTag::Long => "i64",
            TypeTag::Float => "f32",
            TypeTag::Double => "f64",
            TypeTag::Boolean => "bool",
            TypeTag::Array => "Vec",
            TypeTag::Map => "HashMap",
            TypeTag::Object => "Object",
            TypeTag::Void => "()",
        }
    }

    /// Classifies a Rust type string (e.g. `Option<i64>`, `&[u8]`, `HashMap<String, i32>`).
    ///
    /// `Option`, `Box`, `Arc` and `Rc` are transparent: the inner type decides the tag.
    /// Anything unrecognised becomes [`TypeTag::Object`].
    pub fn from_rust_type(rust_type: &str) -> AppResult<TypeTag> {
        // Wrap implementation to parse valid Rust syntax using a type alias
        let code = format!("type _Wrapper = {};", rust_type);
        let parse = SourceFile::parse(&code, Edition::Edition2021);
        let file = parse.tree();

        let type_alias = file
            .syntax()
            .descendants()
            .find_map(ast::TypeAlias::cast)
            .ok_or_else(|| AppError::Parse(format!("Failed to parse type string: {}", rust_type)))?;

        let root_type = type_alias
            .ty()
            .ok_or_else(|| AppError::Parse(format!("Invalid type syntax: {}", rust_type)))?;

        Ok(classify_ast_type(&root_type))
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeTag::String => "string",
            TypeTag::Integer => "integer",
            TypeTag::Long => "long",
            TypeTag::Float => "float",
            TypeTag::Double => "double",
            TypeTag::Boolean => "boolean",
            TypeTag::Array => "array",
            TypeTag::Map => "map",
            TypeTag::Object => "object",
            TypeTag::Void => "void",
        };
        write!(f, "{}", name)
    }
}

/// Classifies an already parsed AST type node.
pub(crate) fn classify_ast_type(ty: &ast::Type) -> TypeTag {
    match ty {
        ast::Type::PathType(path_type) => {
            let Some(segment) = path_type.path().and_then(|p| p.segment()) else {
                return TypeTag::Object;
            };
            let Some(name_ref) = segment.name_ref() else {
                return TypeTag::Object;
            };

            match name_ref.text().as_str() {
                "String" | "str" | "char" | "Cow" => TypeTag::String,
                "i8" | "i16" | "i32" | "u8" | "u16" | "u32" => TypeTag::Integer,
                "i64" | "i128" | "isize" | "u64" | "u128" | "usize" => TypeTag::Long,
                "f32" => TypeTag::Float,
                "f64" => TypeTag::Double,
                "bool" => TypeTag::Boolean,
                "Vec" | "VecDeque" | "HashSet" | "BTreeSet" => TypeTag::Array,
                "HashMap" | "BTreeMap" | "IndexMap" => TypeTag::Map,

                // Transparent wrappers
                "Option" | "Box" | "Arc" | "Rc" => first_generic_arg(&segment)
                    .map(|inner| classify_ast_type(&inner))
                    .unwrap_or(TypeTag::Object),

                _ => TypeTag::Object,
            }
        }
        ast::Type::RefType(ref_type) => ref_type
            .ty()
            .map(|inner| classify_ast_type(&inner))
            .unwrap_or(TypeTag::Object),
        ast::Type::ArrayType(_) | ast::Type::SliceType(_) => TypeTag::Array,
        ast::Type::TupleType(tuple) if tuple.fields().next().is_none() => TypeTag::Void,
        ast::Type::NeverType(_) => TypeTag::Void,
        _ => TypeTag::Object,
    }
}

fn first_generic_arg(segment: &ast::PathSegment) -> Option<ast::Type> {
    let first = segment.generic_arg_list()?.generic_args().next()?;
    match first {
        ast::GenericArg::TypeArg(type_arg) => type_arg.ty(),
        _ => None,
    }
}

/// JSON Schema primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// A string type.
    String,
    /// An integer type.
    Integer,
    /// A floating point number.
    Number,
    /// A boolean type.
    Boolean,
    /// An array.
    Array,
    /// An object.
    Object,
}

impl Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonType::String => write!(f, "string"),
            JsonType::Integer => write!(f, "integer"),
            JsonType::Number => write!(f, "number"),
            JsonType::Boolean => write!(f, "boolean"),
            JsonType::Array => write!(f, "array"),
            JsonType::Object => write!(f, "object"),
        }
    }
}

/// Schema fragment describing one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    /// The JSON type name.
    #[serde(rename = "type")]
    pub type_: JsonType,
    /// Fixed `parameter: <name> (<type>)` description.
    pub description: String,
    /// Lower length bound for strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Lower numeric bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    /// Upper numeric bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
}

/// Trait for converting parameter descriptors to schema properties.
pub trait TypeMapper {
    /// Maps one parameter to its property schema.
    fn map_type(&self, parameter: &ParameterDescriptor) -> AppResult<PropertySchema>;
}

/// The standard flat JSON Schema mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaMapper;

impl TypeMapper for JsonSchemaMapper {
    fn map_type(&self, parameter: &ParameterDescriptor) -> AppResult<PropertySchema> {
        let type_ = json_type(parameter.type_tag)?;
        let mut schema = PropertySchema {
            type_,
            description: format!(
                "parameter: {} ({})",
                parameter.name,
                parameter.type_name()
            ),
            min_length: None,
            minimum: None,
            maximum: None,
        };

        match parameter.type_tag {
            TypeTag::String => schema.min_length = Some(0),
            TypeTag::Integer => {
                schema.minimum = Some(Number::from(i32::MIN));
                schema.maximum = Some(Number::from(i32::MAX));
            }
            TypeTag::Long => {
                schema.minimum = Some(Number::from(i64::MIN));
                schema.maximum = Some(Number::from(i64::MAX));
            }
            TypeTag::Float => {
                schema.minimum = Some(float_bound(f64::from(f32::MIN))?);
                schema.maximum = Some(float_bound(f64::from(f32::MAX))?);
            }
            TypeTag::Double => {
                schema.minimum = Some(float_bound(f64::MIN)?);
                schema.maximum = Some(float_bound(f64::MAX)?);
            }
            _ => {}
        }

        Ok(schema)
    }
}

/// Maps a parameter with the standard [`JsonSchemaMapper`].
pub fn map_type(parameter: &ParameterDescriptor) -> AppResult<PropertySchema> {
    JsonSchemaMapper.map_type(parameter)
}

/// JSON type name for a value tag. `Void` has no JSON representation.
pub fn json_type(tag: TypeTag) -> AppResult<JsonType> {
    match tag {
        TypeTag::String => Ok(JsonType::String),
        TypeTag::Integer | TypeTag::Long => Ok(JsonType::Integer),
        TypeTag::Float | TypeTag::Double => Ok(JsonType::Number),
        TypeTag::Boolean => Ok(JsonType::Boolean),
        TypeTag::Array => Ok(JsonType::Array),
        TypeTag::Map | TypeTag::Object => Ok(JsonType::Object),
        TypeTag::Void => Err(AppError::Mapping(
            "'void' cannot describe a parameter value".into(),
        )),
    }
}

fn float_bound(value: f64) -> AppResult<Number> {
    Number::from_f64(value)
        .ok_or_else(|| AppError::Mapping(format!("Non-finite numeric bound: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(tag: TypeTag) -> ParameterDescriptor {
        ParameterDescriptor::new("value", tag)
    }

    #[test]
    fn test_classify_primitives() {
        let cases = vec![
            ("String", TypeTag::String),
            ("&str", TypeTag::String),
            ("i32", TypeTag::Integer),
            ("u16", TypeTag::Integer),
            ("i64", TypeTag::Long),
            ("usize", TypeTag::Long),
            ("f32", TypeTag::Float),
            ("f64", TypeTag::Double),
            ("bool", TypeTag::Boolean),
        ];

        for (input, expected) in cases {
            assert_eq!(TypeTag::from_rust_type(input).expect(input), expected, "{}", input);
        }
    }

    #[test]
    fn test_classify_containers() {
        assert_eq!(TypeTag::from_rust_type("Vec<String>").unwrap(), TypeTag::Array);
        assert_eq!(TypeTag::from_rust_type("&[u8]").unwrap(), TypeTag::Array);
        assert_eq!(TypeTag::from_rust_type("[i32; 4]").unwrap(), TypeTag::Array);
        assert_eq!(
            TypeTag::from_rust_type("std::collections::HashMap<String, i32>").unwrap(),
            TypeTag::Map
        );
        assert_eq!(TypeTag::from_rust_type("Option<i64>").unwrap(), TypeTag::Long);
        assert_eq!(TypeTag::from_rust_type("Box<UserDto>").unwrap(), TypeTag::Object);
    }

    #[test]
    fn test_classify_fallbacks() {
        assert_eq!(TypeTag::from_rust_type("UserDto").unwrap(), TypeTag::Object);
        assert_eq!(TypeTag::from_rust_type("(i32, String)").unwrap(), TypeTag::Object);
        assert_eq!(TypeTag::from_rust_type("()").unwrap(), TypeTag::Void);
    }

    #[test]
    fn test_string_bounds() {
        let schema = map_type(&ParameterDescriptor::new("query", TypeTag::String)).unwrap();
        assert_eq!(schema.type_, JsonType::String);
        assert_eq!(schema.description, "parameter: query (String)");
        assert_eq!(schema.min_length, Some(0));
        assert!(schema.minimum.is_none());
    }

    #[test]
    fn test_integer_widths() {
        let int = map_type(&param(TypeTag::Integer)).unwrap();
        assert_eq!(int.minimum.unwrap().as_i64(), Some(i64::from(i32::MIN)));
        assert_eq!(int.maximum.unwrap().as_i64(), Some(i64::from(i32::MAX)));

        let long = map_type(&param(TypeTag::Long)).unwrap();
        assert_eq!(long.type_, JsonType::Integer);
        assert_eq!(long.minimum.unwrap().as_i64(), Some(i64::MIN));
        assert_eq!(long.maximum.unwrap().as_i64(), Some(i64::MAX));
    }

    #[test]
    fn test_float_widths() {
        let float = map_type(&param(TypeTag::Float)).unwrap();
        assert_eq!(float.type_, JsonType::Number);
        assert_eq!(float.minimum.unwrap().as_f64(), Some(f64::from(f32::MIN)));
        assert_eq!(float.maximum.unwrap().as_f64(), Some(f64::from(f32::MAX)));

        let double = map_type(&param(TypeTag::Double)).unwrap();
        assert_eq!(double.minimum.unwrap().as_f64(), Some(f64::MIN));
        assert_eq!(double.maximum.unwrap().as_f64(), Some(f64::MAX));
    }

    #[test]
    fn test_float_bounds_reparse_exactly() {
        for tag in [TypeTag::Float, TypeTag::Double] {
            let schema = map_type(&param(tag)).unwrap();
            let text = serde_json::to_string(&schema).unwrap();
            let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(reparsed["minimum"].as_f64(), schema.minimum.unwrap().as_f64());
            assert_eq!(reparsed["maximum"].as_f64(), schema.maximum.unwrap().as_f64());
            assert_eq!(serde_json::to_string(&reparsed).unwrap(), text);
        }
    }

    #[test]
    fn test_unbounded_kinds() {
        for (tag, expected) in [
            (TypeTag::Boolean, JsonType::Boolean),
            (TypeTag::Array, JsonType::Array),
            (TypeTag::Map, JsonType::Object),
            (TypeTag::Object, JsonType::Object),
        ] {
            let schema = map_type(&param(tag)).unwrap();
            assert_eq!(schema.type_, expected);
            assert!(schema.min_length.is_none());
            assert!(schema.minimum.is_none());
            assert!(schema.maximum.is_none());
        }
    }

    #[test]
    fn test_mapping_is_deterministic() {
        for tag in TypeTag::VALUES {
            let first = serde_json::to_string(&map_type(&param(tag)).unwrap()).unwrap();
            let second = serde_json::to_string(&map_type(&param(tag)).unwrap()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_void_is_rejected() {
        let err = map_type(&param(TypeTag::Void)).unwrap_err();
        assert!(matches!(err, AppError::Mapping(_)));
    }

    #[test]
    fn test_declared_type_name_in_description() {
        let p = ParameterDescriptor::new("ids", TypeTag::Array).with_declared_type("Vec<u64>");
        let schema = map_type(&p).unwrap();
        assert_eq!(schema.description, "parameter: ids (Vec<u64>)");
    }
}
