use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::descriptor::TypeDescriptor;

/// Deserialization failure with the JSON path of the offending node.
#[derive(Debug, Error)]
#[error("at JSON path {path} → {source}")]
pub struct DescriptorParseError {
    pub path: String,
    #[source]
    pub source: serde_json::Error,
}

impl From<serde_path_to_error::Error<serde_json::Error>> for DescriptorParseError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        Self { path, source: err.into_inner() }
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, DescriptorParseError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    Ok(serde_path_to_error::deserialize::<_, T>(de)?)
}

pub fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, DescriptorParseError> {
    Ok(serde_path_to_error::deserialize::<_, T>(value)?)
}

pub fn descriptor_from_str(src: &str) -> Result<TypeDescriptor, DescriptorParseError> {
    from_str_with_path(src)
}

pub fn descriptor_from_value(value: serde_json::Value) -> Result<TypeDescriptor, DescriptorParseError> {
    from_value_with_path(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kinds_are_reported_with_path() {
        let err = descriptor_from_str(r#"{"kind": "object", "fields": [{"name": "x", "type": {"kind": "function"}}]}"#)
            .unwrap_err();
        assert!(err.to_string().starts_with("at JSON path "));
        assert!(err.source.to_string().contains("unknown variant `function`"));
    }
}
