//! Output tree: the JSON Schema dialect subset the compiler emits.
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::property::Literal;

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// `{type:"object", properties, required, additionalProperties:false}`
    Object {
        properties: IndexMap<String, SchemaNode>,
        required: Vec<String>,
    },
    /// `{type:"array", items: <schema>}`
    Array(Box<SchemaNode>),
    /// `{type:"array", items: [<schema>, ...]}` (positional)
    Tuple(Vec<SchemaNode>),
    /// `{type: [kind, ...]}`; may include `"null"`
    Types(Vec<&'static str>),
    Const(Literal),
    /// `{}`
    Any,
    AnyOf(Vec<SchemaNode>),
}

impl SchemaNode {
    /// One fragment stands alone; several are combined with `anyOf`.
    pub fn combine(mut fragments: Vec<SchemaNode>) -> SchemaNode {
        match fragments.len() {
            0 => SchemaNode::Any,
            1 => fragments.remove(0),
            _ => SchemaNode::AnyOf(fragments),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            SchemaNode::Object { properties, required } => {
                let mut props = Map::new();
                for (name, schema) in properties {
                    props.insert(name.clone(), schema.to_json());
                }
                json!({
                    "type": "object",
                    "properties": props,
                    "required": required,
                    "additionalProperties": false
                })
            }
            SchemaNode::Array(items) => json!({ "type": "array", "items": items.to_json() }),
            SchemaNode::Tuple(items) => json!({
                "type": "array",
                "items": items.iter().map(SchemaNode::to_json).collect::<Vec<_>>()
            }),
            SchemaNode::Types(kinds) => json!({ "type": kinds }),
            SchemaNode::Const(literal) => json!({ "const": literal.to_json() }),
            SchemaNode::Any => json!({}),
            SchemaNode::AnyOf(arms) => json!({
                "anyOf": arms.iter().map(SchemaNode::to_json).collect::<Vec<_>>()
            }),
        }
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
