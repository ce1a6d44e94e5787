//! Compile resolved type descriptors into JSON Schema documents.
//!
//! Pipeline, leaves first:
//! - [`classify`]: field descriptor → flattened list of value possibilities;
//! - [`entity`]: root descriptor → [`Entity`] (object, array of objects, or
//!   union of object variants);
//! - [`synthesize`]: entity → [`SchemaNode`], the JSON-Schema-shaped output.
//!
//! Each request is independent and side-effect free.
pub mod classify;
pub mod config;
pub mod descriptor;
pub mod entity;
pub mod error;
pub mod path_de;
pub mod property;
pub mod schema;
pub mod synthesize;

pub use config::{NullOnly, Options};
pub use descriptor::TypeDescriptor;
pub use entity::Entity;
pub use error::CompileError;
pub use schema::SchemaNode;

use classify::Classifier;
use synthesize::Synthesizer;

/// Build the intermediate entity for `descriptor`.
pub fn compile_entity(descriptor: &TypeDescriptor, options: &Options) -> Result<Entity, CompileError> {
    entity::build(descriptor, &Classifier::new(options.max_depth))
}

/// Compile `descriptor` into a schema. All-or-nothing: any unsupported part
/// fails the whole request.
pub fn compile(descriptor: &TypeDescriptor, options: &Options) -> Result<SchemaNode, CompileError> {
    let entity = compile_entity(descriptor, options)?;
    Ok(Synthesizer::new(options.null_only).synthesize(&entity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn compiles_descriptor_documents_end_to_end() {
        let descriptor = path_de::descriptor_from_str(r#"{
            "kind": "array",
            "element": {"kind": "object", "name": "Row", "fields": [
                {"name": "kind", "type": {"kind": "enum", "members": [
                    {"name": "A"}, {"name": "B", "value": "b"}
                ]}},
                {"name": "meta", "optional": true, "type": {"kind": "wildcard"}}
            ]}
        }"#).unwrap();
        let schema = compile(&descriptor, &Options::default()).unwrap();
        assert_eq!(schema.to_json(), json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "kind": {"anyOf": [{"const": 0}, {"const": "b"}]},
                    "meta": {}
                },
                "required": ["kind"],
                "additionalProperties": false
            }
        }));
    }

    #[rstest::rstest]
    #[case::user(include_str!("../fixtures/user.descriptor.json"), include_str!("../fixtures/user.schema.json"))]
    #[case::nullable_fields(
        include_str!("../fixtures/nullable_fields.descriptor.json"),
        include_str!("../fixtures/nullable_fields.schema.json")
    )]
    #[case::array_of_union(
        include_str!("../fixtures/array_of_union.descriptor.json"),
        include_str!("../fixtures/array_of_union.schema.json")
    )]
    #[case::kitchen_sink(
        include_str!("../fixtures/kitchen_sink.descriptor.json"),
        include_str!("../fixtures/kitchen_sink.schema.json")
    )]
    fn fixtures(#[case] descriptor: &str, #[case] expected: &str) {
        let descriptor = path_de::descriptor_from_str(descriptor).unwrap();
        let expected: serde_json::Value = serde_json::from_str(expected).unwrap();
        assert_eq!(compile(&descriptor, &Options::default()).unwrap().to_json(), expected);
    }

    #[test]
    fn failures_abort_the_whole_request() {
        let descriptor = TypeDescriptor::object("User", vec![
            descriptor::Field::required("ok", TypeDescriptor::string()),
            descriptor::Field::required("bad", TypeDescriptor::Unsupported { syntax: "T extends U ? X : Y".into() }),
        ]);
        let err = compile(&descriptor, &Options::default()).unwrap_err();
        assert_eq!(err.to_string(), "type `T extends U ? X : Y` is not supported (User.bad)");
    }
}
