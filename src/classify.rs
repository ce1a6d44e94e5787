//! Value classifier: one descriptor → the ordered, flattened list of values it
//! admits.
//!
//! Rules, one per descriptor kind:
//! - primitives, literals, `null` and wildcards map to a single leaf value;
//! - objects, arrays and tuples map to a single composite value whose children
//!   are classified recursively;
//! - enums lower eagerly to one literal per member;
//! - unions classify every member and concatenate the results, so no union
//!   ever survives into the output.
use serde_json::Value;
use tracing::trace;

use crate::descriptor::{EnumMember, Field, LiteralConst, ObjectShape, TypeDescriptor};
use crate::error::CompileError;
use crate::property::{Literal, Property, PropertyMap, PropertyValue};

#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    max_depth: usize,
}

impl Classifier {
    pub fn new(max_depth: usize) -> Self { Self { max_depth } }

    pub fn max_depth(&self) -> usize { self.max_depth }

    /// Classify a standalone descriptor. `path` names it in diagnostics.
    pub fn classify(&self, descriptor: &TypeDescriptor, path: &str) -> Result<Vec<PropertyValue>, CompileError> {
        self.walk(descriptor, path, 0)
    }

    /// Build the property map of an object shape, one [`Property`] per field.
    pub fn properties(&self, shape: &ObjectShape, path: &str) -> Result<PropertyMap, CompileError> {
        self.object_properties(shape, path, 0)
    }

    fn walk(&self, descriptor: &TypeDescriptor, path: &str, depth: usize) -> Result<Vec<PropertyValue>, CompileError> {
        if depth > self.max_depth {
            return Err(CompileError::DepthExceeded { path: path.to_string(), limit: self.max_depth });
        }
        let values = match descriptor {
            TypeDescriptor::Primitive { kind } => vec![PropertyValue::Value(*kind)],
            TypeDescriptor::Literal { value } => vec![literal_value(value)],
            TypeDescriptor::Null => vec![PropertyValue::Null],
            // escape hatch: nothing below a wildcard is inspected
            TypeDescriptor::Wildcard => vec![PropertyValue::Any],
            TypeDescriptor::Object(shape) => {
                vec![PropertyValue::Object(self.object_properties(shape, path, depth + 1)?)]
            }
            TypeDescriptor::Array { element } => {
                let item_path = format!("{path}[]");
                vec![PropertyValue::Array(self.walk(element, &item_path, depth + 1)?)]
            }
            TypeDescriptor::Tuple { elements } => {
                let positions = elements
                    .iter()
                    .enumerate()
                    .map(|(i, el)| self.walk(el, &format!("{path}[{i}]"), depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                vec![PropertyValue::Tuple(positions)]
            }
            TypeDescriptor::Enum(shape) => {
                if shape.members.is_empty() {
                    return Err(unsupported(path, "enum with no members"));
                }
                shape
                    .members
                    .iter()
                    .enumerate()
                    .map(|(ordinal, member)| enum_literal(member, ordinal, path))
                    .collect::<Result<Vec<_>, _>>()?
            }
            TypeDescriptor::Union { members } => {
                let mut flat = Vec::new();
                for member in members {
                    flat.extend(self.walk(member, path, depth + 1)?);
                }
                if flat.is_empty() {
                    return Err(unsupported(path, "union with no members"));
                }
                flat
            }
            TypeDescriptor::Unsupported { syntax } => {
                return Err(unsupported(path, &format!("type `{syntax}`")));
            }
        };
        Ok(values)
    }

    pub(crate) fn object_properties(&self, shape: &ObjectShape, path: &str, depth: usize) -> Result<PropertyMap, CompileError> {
        let mut properties = PropertyMap::with_capacity(shape.fields.len());
        for field in &shape.fields {
            let field_path = format!("{path}.{}", field.name);
            if properties.contains_key(&field.name) {
                let count = shape.fields.iter().filter(|f| f.name == field.name).count();
                return Err(CompileError::AmbiguousDeclaration { path: field_path, count });
            }
            let property = self.field(field, &field_path, depth)?;
            properties.insert(field.name.clone(), property);
        }
        Ok(properties)
    }

    fn field(&self, field: &Field, path: &str, depth: usize) -> Result<Property, CompileError> {
        let declaration = match field.declarations.as_slice() {
            [] => return Err(CompileError::MissingDeclaration { path: path.to_string() }),
            [only] => only,
            many => {
                return Err(CompileError::AmbiguousDeclaration { path: path.to_string(), count: many.len() });
            }
        };
        let values = self.walk(declaration, path, depth)?;
        trace!(path, optional = field.optional, values = values.len(), "classified field");
        Ok(Property { is_optional: field.optional, values })
    }
}

impl Default for Classifier {
    fn default() -> Self { Self::new(crate::config::DEFAULT_MAX_DEPTH) }
}

fn literal_value(value: &LiteralConst) -> PropertyValue {
    match value {
        LiteralConst::Null => PropertyValue::Null,
        LiteralConst::Bool(b) => PropertyValue::Literal(Literal::Bool(*b)),
        LiteralConst::Number(n) => PropertyValue::Literal(Literal::Number(n.clone())),
        LiteralConst::String(s) => PropertyValue::Literal(Literal::String(s.clone())),
    }
}

/// Explicit scalar initializer if present, otherwise the member's ordinal.
fn enum_literal(member: &EnumMember, ordinal: usize, path: &str) -> Result<PropertyValue, CompileError> {
    let literal = match &member.value {
        None => Literal::from(ordinal),
        Some(Value::String(s)) => Literal::String(s.clone()),
        Some(Value::Number(n)) => Literal::Number(n.clone()),
        Some(Value::Bool(b)) => Literal::Bool(*b),
        Some(other) => {
            return Err(CompileError::UnknownEnumInitializer {
                path: path.to_string(),
                member: member.name.clone(),
                initializer: other.to_string(),
            });
        }
    };
    Ok(PropertyValue::Literal(literal))
}

fn unsupported(path: &str, shape: &str) -> CompileError {
    CompileError::UnsupportedShape { path: path.to_string(), shape: shape.to_string() }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
