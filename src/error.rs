use thiserror::Error;

/// Every way a compilation request can fail. `path` is the qualified name of
/// the field being compiled, e.g. `User.address.street` or `User.tags[]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("{shape} is not supported ({path})")]
    UnsupportedShape { path: String, shape: String },

    #[error("array element must be an object shape, found {found} ({path})")]
    UnsupportedArrayElement { path: String, found: &'static str },

    #[error(
        "root must be an object, a union of objects, or an array of those; found {found} ({path})"
    )]
    UnsupportedRootShape { path: String, found: &'static str },

    #[error("more than one declaration ({count}) for field ({path})")]
    AmbiguousDeclaration { path: String, count: usize },

    #[error("field does not have any declarations ({path})")]
    MissingDeclaration { path: String },

    #[error("unknown initializer `{initializer}` for enum member `{member}` ({path})")]
    UnknownEnumInitializer { path: String, member: String, initializer: String },

    #[error("descriptor nesting exceeds the maximum depth of {limit} ({path})")]
    DepthExceeded { path: String, limit: usize },
}

impl CompileError {
    pub fn path(&self) -> &str {
        match self {
            Self::UnsupportedShape { path, .. }
            | Self::UnsupportedArrayElement { path, .. }
            | Self::UnsupportedRootShape { path, .. }
            | Self::AmbiguousDeclaration { path, .. }
            | Self::MissingDeclaration { path }
            | Self::UnknownEnumInitializer { path, .. }
            | Self::DepthExceeded { path, .. } => path,
        }
    }
}
