//! Flattened per-field value possibilities.
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Number;

pub use crate::descriptor::PrimitiveKind;

/// Field name → constraint, in declaration order.
pub type PropertyMap = IndexMap<String, Property>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub is_optional: bool,
    /// Ordered, not a set: order decides fragment order downstream.
    pub values: Vec<PropertyValue>,
}

/// One value a field may take. Unions are never nested; they are flattened
/// into the surrounding `Vec<PropertyValue>` when classified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Value(PrimitiveKind),
    Literal(Literal),
    Null,
    Any,
    Object(PropertyMap),
    Array(Vec<PropertyValue>),
    Tuple(Vec<Vec<PropertyValue>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Number(Number),
    Bool(bool),
}

impl Property {
    pub fn accepts_null(&self) -> bool {
        self.values.iter().any(|v| matches!(v, PropertyValue::Null))
    }
}

impl Literal {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::from(s.clone()),
            Self::Number(n) => serde_json::Value::Number(n.clone()),
            Self::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl From<usize> for Literal {
    fn from(ordinal: usize) -> Self { Self::Number(Number::from(ordinal as u64)) }
}
