//! Resolved type descriptors, the compiler's input.
//!
//! A descriptor is produced by whatever front end resolved the host type
//! (aliases expanded, enums resolved to member lists, optionality attached to
//! fields). The core only reads it.
use serde::Deserialize;
use serde_json::Number;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Primitive {
        #[serde(rename = "type")]
        kind: PrimitiveKind,
    },
    Literal {
        value: LiteralConst,
    },
    Null,
    /// Unconstrained value, e.g. an index-keyed record type.
    Wildcard,
    Object(ObjectShape),
    Array {
        element: Box<TypeDescriptor>,
    },
    /// Fixed-length positional array.
    Tuple {
        elements: Vec<TypeDescriptor>,
    },
    Union {
        members: Vec<TypeDescriptor>,
    },
    Enum(EnumShape),
    /// Something the front end resolved but the compiler cannot express
    /// (function types, unresolved generics, ...).
    Unsupported {
        syntax: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Number,
    String,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LiteralConst {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ObjectShape {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A named field together with every declaration the front end found for it.
/// A well-resolved field has exactly one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawField")]
pub struct Field {
    pub name: String,
    pub optional: bool,
    pub declarations: Vec<TypeDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EnumShape {
    #[serde(default)]
    pub name: Option<String>,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnumMember {
    pub name: String,
    /// Raw initializer; `None` means the member takes its ordinal. An explicit
    /// `null` is kept as `Some(Value::Null)` so it can be rejected.
    #[serde(default, deserialize_with = "present_value")]
    pub value: Option<serde_json::Value>,
}

/// A key that is present always yields `Some`, even when its value is `null`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Wire form of [`Field`]: `"type"` is shorthand for a single declaration.
#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(default)]
    optional: bool,
    #[serde(default, rename = "type")]
    ty: Option<TypeDescriptor>,
    #[serde(default)]
    declarations: Vec<TypeDescriptor>,
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        let declarations = raw.ty.into_iter().chain(raw.declarations).collect();
        Self { name: raw.name, optional: raw.optional, declarations }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeDescriptor {
    pub fn number() -> Self { Self::Primitive { kind: PrimitiveKind::Number } }
    pub fn string() -> Self { Self::Primitive { kind: PrimitiveKind::String } }
    pub fn boolean() -> Self { Self::Primitive { kind: PrimitiveKind::Boolean } }

    pub fn literal(value: impl Into<LiteralConst>) -> Self {
        Self::Literal { value: value.into() }
    }

    pub fn object(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::Object(ObjectShape { name: Some(name.into()), fields })
    }

    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array { element: Box::new(element) }
    }

    pub fn tuple(elements: Vec<TypeDescriptor>) -> Self {
        Self::Tuple { elements }
    }

    pub fn union(members: Vec<TypeDescriptor>) -> Self {
        Self::Union { members }
    }

    /// Short label for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primitive { .. } => "primitive",
            Self::Literal { .. } => "literal",
            Self::Null => "null",
            Self::Wildcard => "wildcard",
            Self::Object(_) => "object",
            Self::Array { .. } => "array",
            Self::Tuple { .. } => "tuple",
            Self::Union { .. } => "union",
            Self::Enum(_) => "enum",
            Self::Unsupported { .. } => "unsupported type",
        }
    }
}

impl PrimitiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

impl Field {
    pub fn required(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self { name: name.into(), optional: false, declarations: vec![ty] }
    }

    pub fn optional(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self { name: name.into(), optional: true, declarations: vec![ty] }
    }
}

impl From<&str> for LiteralConst {
    fn from(s: &str) -> Self { Self::String(s.to_string()) }
}

impl From<String> for LiteralConst {
    fn from(s: String) -> Self { Self::String(s) }
}

impl From<bool> for LiteralConst {
    fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<i64> for LiteralConst {
    fn from(n: i64) -> Self { Self::Number(n.into()) }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
