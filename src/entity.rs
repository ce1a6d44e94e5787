//! Entity builder: decides what the root descriptor denotes (one object, an
//! array of objects, or a union of object variants) and builds the property
//! map of every variant.
use serde::Serialize;
use tracing::debug;

use crate::classify::Classifier;
use crate::descriptor::{ObjectShape, TypeDescriptor};
use crate::error::CompileError;
use crate::property::PropertyMap;

const ROOT_PATH: &str = "<root>";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub name: Option<String>,
    pub is_array: bool,
    /// Never empty; more than one entry only for a union root.
    pub allowed_types: Vec<ObjectType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectType {
    pub name: Option<String>,
    pub properties: PropertyMap,
}

pub fn build(root: &TypeDescriptor, classifier: &Classifier) -> Result<Entity, CompileError> {
    // unwrap at most one array layer
    let (is_array, target) = match root {
        TypeDescriptor::Array { element } => (true, element.as_ref()),
        TypeDescriptor::Tuple { elements } if elements.len() == 1 => (true, &elements[0]),
        other => (false, other),
    };

    let root_path = if is_array { format!("{ROOT_PATH}[]") } else { ROOT_PATH.to_string() };
    let reject = |found: &TypeDescriptor| {
        let path = root_path.clone();
        if is_array {
            CompileError::UnsupportedArrayElement { path, found: found.label() }
        } else {
            CompileError::UnsupportedRootShape { path, found: found.label() }
        }
    };

    let mut shapes = Vec::<&ObjectShape>::new();
    match target {
        TypeDescriptor::Object(shape) => shapes.push(shape),
        TypeDescriptor::Union { members } => {
            let variants = Variants { reject: &reject, path: &root_path, max_depth: classifier.max_depth() };
            variants.collect(members, &mut shapes, 1)?
        }
        other => return Err(reject(other)),
    }
    if shapes.is_empty() {
        return Err(reject(target));
    }

    let allowed_types = shapes
        .into_iter()
        .map(|shape| {
            let path = shape.name.as_deref().unwrap_or(ROOT_PATH);
            Ok(ObjectType {
                name: shape.name.clone(),
                properties: classifier.properties(shape, path)?,
            })
        })
        .collect::<Result<Vec<_>, CompileError>>()?;

    let name = match target {
        TypeDescriptor::Object(shape) => shape.name.clone(),
        _ => None,
    };
    debug!(?name, is_array, variants = allowed_types.len(), "built entity");
    Ok(Entity { name, is_array, allowed_types })
}

/// Flattens nested root unions into their object variants.
struct Variants<'r, F> {
    reject: &'r F,
    path: &'r str,
    max_depth: usize,
}

impl<F: Fn(&TypeDescriptor) -> CompileError> Variants<'_, F> {
    fn collect<'a>(
        &self,
        members: &'a [TypeDescriptor],
        out: &mut Vec<&'a ObjectShape>,
        depth: usize,
    ) -> Result<(), CompileError> {
        if depth > self.max_depth {
            return Err(CompileError::DepthExceeded { path: self.path.to_string(), limit: self.max_depth });
        }
        for member in members {
            match member {
                TypeDescriptor::Object(shape) => out.push(shape),
                TypeDescriptor::Union { members } => self.collect(members, out, depth + 1)?,
                other => return Err((self.reject)(other)),
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Field;
    use pretty_assertions::assert_eq;

    fn user() -> TypeDescriptor {
        TypeDescriptor::object("User", vec![
            Field::required("id", TypeDescriptor::string()),
            Field::optional("age", TypeDescriptor::number()),
        ])
    }

    fn build_default(root: &TypeDescriptor) -> Result<Entity, CompileError> {
        build(root, &Classifier::default())
    }

    #[test]
    fn plain_object_is_a_single_variant() {
        let entity = build_default(&user()).unwrap();
        assert!(!entity.is_array);
        assert_eq!(entity.name.as_deref(), Some("User"));
        assert_eq!(entity.allowed_types.len(), 1);
        let props = &entity.allowed_types[0].properties;
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["id", "age"]);
        assert!(props["age"].is_optional);
    }

    #[test]
    fn array_and_single_tuple_roots_unwrap_once() {
        let from_array = build_default(&TypeDescriptor::array(user())).unwrap();
        let from_tuple = build_default(&TypeDescriptor::tuple(vec![user()])).unwrap();
        assert!(from_array.is_array);
        assert_eq!(from_array, from_tuple);
    }

    #[test]
    fn union_root_yields_one_variant_per_member() {
        let other = TypeDescriptor::object("Bot", vec![Field::required("token", TypeDescriptor::string())]);
        let root = TypeDescriptor::array(TypeDescriptor::union(vec![
            user(),
            TypeDescriptor::union(vec![other]),
        ]));
        let entity = build_default(&root).unwrap();
        assert!(entity.is_array);
        let names = entity.allowed_types.iter().map(|t| t.name.as_deref()).collect::<Vec<_>>();
        assert_eq!(names, vec![Some("User"), Some("Bot")]);
    }

    #[test]
    fn non_object_roots_are_rejected() {
        assert_eq!(
            build_default(&TypeDescriptor::string()).unwrap_err(),
            CompileError::UnsupportedRootShape { path: "<root>".into(), found: "primitive" }
        );
        assert_eq!(
            build_default(&TypeDescriptor::tuple(vec![user(), user()])).unwrap_err(),
            CompileError::UnsupportedRootShape { path: "<root>".into(), found: "tuple" }
        );
        assert_eq!(
            build_default(&TypeDescriptor::union(vec![user(), TypeDescriptor::Null])).unwrap_err(),
            CompileError::UnsupportedRootShape { path: "<root>".into(), found: "null" }
        );
        assert!(matches!(
            build_default(&TypeDescriptor::union(vec![])),
            Err(CompileError::UnsupportedRootShape { .. })
        ));
    }

    #[test]
    fn array_of_non_objects_is_rejected() {
        assert_eq!(
            build_default(&TypeDescriptor::array(TypeDescriptor::string())).unwrap_err(),
            CompileError::UnsupportedArrayElement { path: "<root>[]".into(), found: "primitive" }
        );
        assert_eq!(
            build_default(&TypeDescriptor::array(TypeDescriptor::array(user()))).unwrap_err(),
            CompileError::UnsupportedArrayElement { path: "<root>[]".into(), found: "array" }
        );
    }

    #[test]
    fn array_of_mixed_union_rejects_the_non_object_member() {
        let root = TypeDescriptor::array(TypeDescriptor::union(vec![user(), TypeDescriptor::string()]));
        assert_eq!(
            build_default(&root).unwrap_err(),
            CompileError::UnsupportedArrayElement { path: "<root>[]".into(), found: "primitive" }
        );
    }

    #[test]
    fn deeply_nested_root_unions_hit_the_depth_guard() {
        let mut root = user();
        for _ in 0..10 {
            root = TypeDescriptor::union(vec![root]);
        }
        assert_eq!(
            build(&root, &Classifier::new(4)).unwrap_err(),
            CompileError::DepthExceeded { path: "<root>".into(), limit: 4 }
        );
        assert_eq!(build(&root, &Classifier::new(16)).unwrap().allowed_types.len(), 1);
    }

    #[test]
    fn field_errors_are_qualified_by_object_name() {
        let root = TypeDescriptor::object("User", vec![
            Field::required("cb", TypeDescriptor::Unsupported { syntax: "() => void".into() }),
        ]);
        assert_eq!(build_default(&root).unwrap_err().path(), "User.cb");
    }
}
