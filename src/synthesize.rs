//! Schema synthesizer: entity / property values → [`SchemaNode`].
//!
//! Per field, fragments are produced in a fixed order:
//! 1. one `{type: [...]}` fragment listing every distinct primitive kind, with
//!    `"null"` folded in when the field also accepts null;
//! 2. one fragment per remaining value, in classification order.
//!
//! A single fragment stands alone, several are wrapped in `anyOf`.
use indexmap::IndexMap;

use crate::config::NullOnly;
use crate::entity::Entity;
use crate::property::{PrimitiveKind, Property, PropertyMap, PropertyValue};
use crate::schema::SchemaNode;

#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer {
    null_only: NullOnly,
}

/// A field is required when it is neither optional nor nullable.
///
/// Accepting `null` is treated as "may be left out" even when the field carries
/// no optional marker.
pub fn is_strictly_required(property: &Property) -> bool {
    !property.is_optional && !property.accepts_null()
}

impl Synthesizer {
    pub fn new(null_only: NullOnly) -> Self { Self { null_only } }

    pub fn synthesize(&self, entity: &Entity) -> SchemaNode {
        let variants = entity
            .allowed_types
            .iter()
            .map(|ty| self.object(&ty.properties))
            .collect();
        let combined = SchemaNode::combine(variants);
        if entity.is_array {
            SchemaNode::Array(Box::new(combined))
        } else {
            combined
        }
    }

    pub fn object(&self, properties: &PropertyMap) -> SchemaNode {
        let schemas = properties
            .iter()
            .map(|(name, property)| (name.clone(), self.field(&property.values)))
            .collect::<IndexMap<_, _>>();
        let required = properties
            .iter()
            .filter(|(_, property)| is_strictly_required(property))
            .map(|(name, _)| name.clone())
            .collect();
        SchemaNode::Object { properties: schemas, required }
    }

    pub fn field(&self, values: &[PropertyValue]) -> SchemaNode {
        let mut fragments = Vec::<SchemaNode>::new();

        let has_null = values.iter().any(|v| matches!(v, PropertyValue::Null));
        let mut kinds = Vec::<PrimitiveKind>::new();
        for value in values {
            if let PropertyValue::Value(kind) = value {
                if !kinds.contains(kind) {
                    kinds.push(*kind);
                }
            }
        }
        if !kinds.is_empty() {
            let mut names = kinds.iter().map(|k| k.as_str()).collect::<Vec<_>>();
            if has_null {
                names.push("null");
            }
            fragments.push(SchemaNode::Types(names));
        } else if has_null && self.null_only == NullOnly::TypeNull {
            fragments.push(SchemaNode::Types(vec!["null"]));
        }

        for value in values {
            let fragment = match value {
                PropertyValue::Value(_) | PropertyValue::Null => continue,
                PropertyValue::Object(properties) => self.object(properties),
                PropertyValue::Literal(literal) => SchemaNode::Const(literal.clone()),
                PropertyValue::Any => SchemaNode::Any,
                PropertyValue::Array(items) => SchemaNode::Array(Box::new(self.field(items))),
                PropertyValue::Tuple(positions) => {
                    SchemaNode::Tuple(positions.iter().map(|p| self.field(p)).collect())
                }
            };
            fragments.push(fragment);
        }

        SchemaNode::combine(fragments)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
