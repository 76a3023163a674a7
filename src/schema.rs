//! Introspected schema model.
//!
//! These types mirror the shape of a GraphQL introspection result closely
//! enough to deserialize one directly. They are built once, right after the
//! schema is loaded, and are read-only for the rest of the run.
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Error;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Category of a schema type or type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

/// A possibly wrapped reference to a named type.
///
/// `name` is only set on the innermost node; `LIST` and `NON_NULL` nodes
/// carry the wrapped reference in `of_type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: Kind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

/// A field of an object/interface, an input field, or an argument.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: Option<Kind>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub args: Vec<Field>,
    /// Opaque; introspection hands it over as GraphQL literal text.
    #[serde(default)]
    pub default_value: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// A named schema type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    pub kind: Kind,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<Field>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub input_fields: Vec<Field>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub enum_values: Vec<EnumValue>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub interfaces: Vec<TypeRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub possible_types: Vec<TypeRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RootType {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub query_type: Option<RootType>,
    #[serde(default)]
    pub mutation_type: Option<RootType>,
    #[serde(default)]
    pub subscription_type: Option<RootType>,
    /// Required key; `null` reads as empty.
    #[serde(deserialize_with = "null_as_empty")]
    pub types: Vec<Type>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

/// Where the schema object may sit inside a saved introspection document.
const SCHEMA_POINTERS: &[&str] = &["/data/__schema", "/__schema"];

const BUILTIN_SCALARS: &[&str] = &["Boolean", "Float", "ID", "Int", "String"];

/// Base type names treated as primitives, compared case-insensitively.
const PRIMITIVE_TYPES: &[&str] = &["int", "string", "bool", "boolean"];

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Scalar => "SCALAR",
            Kind::Object => "OBJECT",
            Kind::Interface => "INTERFACE",
            Kind::Union => "UNION",
            Kind::Enum => "ENUM",
            Kind::InputObject => "INPUT_OBJECT",
            Kind::List => "LIST",
            Kind::NonNull => "NON_NULL",
        };
        f.write_str(s)
    }
}

impl Kind {
    pub fn is_wrapper(self) -> bool {
        matches!(self, Kind::List | Kind::NonNull)
    }
}

impl TypeRef {
    pub fn named(kind: Kind, name: impl Into<String>) -> Self {
        Self { kind, name: Some(name.into()), of_type: None }
    }
    pub fn non_null(inner: TypeRef) -> Self {
        Self { kind: Kind::NonNull, name: None, of_type: Some(Box::new(inner)) }
    }
    pub fn list(inner: TypeRef) -> Self {
        Self { kind: Kind::List, name: None, of_type: Some(Box::new(inner)) }
    }
}

impl Field {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: None,
            type_ref,
            args: Vec::new(),
            default_value: None,
        }
    }

    pub fn with_args(mut self, args: Vec<Field>) -> Self {
        self.args = args;
        self
    }

    /// Exported identifier used for this field in generated code.
    pub fn go_name(&self) -> String {
        crate::codegen::naming::go_name(&self.name)
    }

    pub fn is_required(&self) -> bool {
        self.type_ref.is_non_null()
    }

    pub fn is_scalar_id(&self) -> bool {
        self.type_ref.is_scalar_id()
    }

    pub fn is_primitive(&self) -> bool {
        let name = self.type_ref.type_name().to_ascii_lowercase();
        PRIMITIVE_TYPES.contains(&name.as_str())
    }

    /// ENUM at the outermost level or directly beneath it. Deeper wrapping
    /// (e.g. `[Status!]`) is deliberately not classified as an enum.
    pub fn is_enum(&self) -> bool {
        if self.type_ref.kind == Kind::Enum {
            return true;
        }
        matches!(&self.type_ref.of_type, Some(inner) if inner.kind == Kind::Enum)
    }

    pub fn has_required_arg(&self) -> bool {
        self.args.iter().any(Field::is_required)
    }
}

impl Type {
    /// Fields that make up the generated struct: input fields for input
    /// objects, output fields otherwise.
    pub fn struct_fields(&self) -> &[Field] {
        match self.kind {
            Kind::InputObject => &self.input_fields,
            _ => &self.fields,
        }
    }
}

impl Schema {
    /// Load a schema saved from an introspection query. Accepts the full
    /// response (`{"data": {"__schema": ...}}`), the `{"__schema": ...}`
    /// envelope, or the bare schema object.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source, path)
    }

    /// A response carrying GraphQL `errors` and no schema fails with those
    /// messages. Any other document must hold a `types` key.
    pub fn from_json_str(source: &str, origin: &Path) -> Result<Self, Error> {
        let mut document: Value = crate::path_de::json_from_str(source, origin)?;
        let found = SCHEMA_POINTERS
            .iter()
            .find(|p| document.pointer(p).is_some_and(|v| !v.is_null()));
        let root = match found {
            Some(pointer) => document.pointer_mut(pointer).map(Value::take).unwrap_or_default(),
            None => {
                if let Some(messages) = response_errors(&document) {
                    return Err(Error::Parse {
                        path: origin.to_path_buf(),
                        location: "errors".to_string(),
                        message: format!("introspection response has no schema: {messages}"),
                    });
                }
                document
            }
        };
        crate::path_de::from_value_with_path(root, origin)
    }

    pub fn type_by_name(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Name-keyed view in schema order.
    pub fn index(&self) -> IndexMap<&str, &Type> {
        self.types.iter().map(|t| (t.name.as_str(), t)).collect()
    }
}

pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `message`s of a top-level GraphQL `errors` array, joined with `; `.
fn response_errors(document: &Value) -> Option<String> {
    let errors = document.get("errors")?.as_array()?;
    let messages: Vec<String> = errors
        .iter()
        .map(|e| match e.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => e.to_string(),
        })
        .collect();
    Some(if messages.is_empty() { "empty errors list".to_string() } else { messages.join("; ") })
}

/// Introspection emits `null` instead of `[]` for lists that do not apply
/// to a type's kind.
fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
