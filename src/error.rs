//! Error types for the typed provider SDK.

use crate::model::Kind;
use thiserror::Error;

/// Errors raised while translating between tagged models and resource state.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A model field has no attribute tag.
    #[error("field {path:?} is missing a `tag` annotation")]
    MissingTag {
        /// Dot-joined path of Rust field names, e.g. `inner.nested.value`.
        path: String,
    },

    /// The named field does not exist on the model type.
    #[error("field {field:?} does not exist on {model}")]
    UnknownField {
        /// The Rust field name that was looked up.
        field: String,
        /// The model type name.
        model: &'static str,
    },

    /// The declared type of a field cannot be translated to state.
    #[error("unsupported kind {kind} for attribute {key:?}")]
    UnsupportedKind {
        /// The attribute key.
        key: String,
        /// The declared kind.
        kind: Kind,
    },

    /// A state value did not have the shape the declared type needs.
    #[error("attribute {path:?}: expected {expected}, got {found}")]
    TypeMismatch {
        /// Attribute path of the offending value.
        path: String,
        /// The declared kind.
        expected: Kind,
        /// Name of the value actually found.
        found: &'static str,
    },

    /// An integer did not fit the declared integer width.
    #[error("attribute {path:?}: {value} is out of range for {target}")]
    OutOfRange {
        /// Attribute path of the offending value.
        path: String,
        /// The value found in state.
        value: i64,
        /// The declared Rust type.
        target: &'static str,
    },

    /// Decoding a single field failed.
    #[error("decoding field {field:?}: {source}")]
    Field {
        /// The Rust field name.
        field: &'static str,
        /// The underlying failure.
        #[source]
        source: Box<ModelError>,
    },

    /// The state store rejected a write.
    #[error("setting {key:?}: {source}")]
    StateWrite {
        /// The attribute key being written.
        key: String,
        /// The store's rejection.
        #[source]
        source: StateError,
    },
}

/// Errors raised while combining argument and attribute schemas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The key is declared more than once.
    #[error("{0:?} already exists in the schema")]
    AlreadyExists(String),

    /// A computed-only descriptor was supplied as an argument.
    #[error("{0:?} is a computed-only field and must be declared as an attribute")]
    ComputedOnlyArgument(String),

    /// An optional or required descriptor was supplied as an attribute.
    #[error("{0:?} is an optional/required field and must be declared as an argument")]
    SettableAttribute(String),
}

/// Errors raised by a state store when it refuses a write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The key is not part of the bound schema.
    #[error("attribute {0:?} is not defined in the schema")]
    UnknownAttribute(String),

    /// The value does not match the attribute type.
    #[error("{summary}: {detail}")]
    InvalidValue {
        /// Short description of the first problem found.
        summary: String,
        /// Detail for the first problem found.
        detail: String,
    },
}

/// Errors that can occur when implementing a resource.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A validation error occurred.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An internal SDK error occurred.
    #[error("SDK error: {0}")]
    Sdk(String),

    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A model could not be translated to or from state.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// The resource schema is inconsistent.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Persisted state could not be loaded.
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resource already exists and must be imported.
    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    /// Operation timed out.
    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),

    /// Operation not implemented.
    #[error("Unimplemented: {0}")]
    Unimplemented(String),
}

impl ProviderError {
    /// Get the error message as a string.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Sdk(msg)
            | Self::Configuration(msg)
            | Self::AlreadyExists(msg)
            | Self::DeadlineExceeded(msg)
            | Self::Unimplemented(msg) => msg.clone(),
            Self::Model(err) => err.to_string(),
            Self::Schema(err) => err.to_string(),
            Self::State(err) => err.to_string(),
            Self::Serialization(err) => err.to_string(),
        }
    }
}

impl ModelError {
    /// Wrap this error with the name of the field being decoded.
    pub(crate) fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::NotFound("resource-123".to_string());
        assert_eq!(format!("{}", err), "Resource not found: resource-123");

        let err = ProviderError::AlreadyExists("/subscriptions/1".to_string());
        assert_eq!(format!("{}", err), "Resource already exists: /subscriptions/1");

        let err = ProviderError::DeadlineExceeded("create".to_string());
        assert_eq!(format!("{}", err), "Deadline exceeded: create");
    }

    #[test]
    fn test_model_error_display() {
        let err = ModelError::MissingTag {
            path: "inner.nested.value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "field \"inner.nested.value\" is missing a `tag` annotation"
        );

        let err = ModelError::UnsupportedKind {
            key: "matrix".to_string(),
            kind: Kind::List(Box::new(Kind::List(Box::new(Kind::String)))),
        };
        assert_eq!(
            err.to_string(),
            "unsupported kind list of list of string for attribute \"matrix\""
        );
    }

    #[test]
    fn test_field_error_names_field() {
        let err = ModelError::TypeMismatch {
            path: "tags.1".to_string(),
            expected: Kind::String,
            found: "int",
        }
        .in_field("tags");
        assert_eq!(
            err.to_string(),
            "decoding field \"tags\": attribute \"tags.1\": expected string, got int"
        );
    }

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::AlreadyExists("name".to_string());
        assert_eq!(err.to_string(), "\"name\" already exists in the schema");
    }

    #[test]
    fn test_message_method() {
        let err = ProviderError::Configuration("invalid config".to_string());
        assert_eq!(err.message(), "invalid config");

        let err: ProviderError = SchemaError::SettableAttribute("id".to_string()).into();
        assert_eq!(
            err.message(),
            "\"id\" is an optional/required field and must be declared as an argument"
        );
    }
}
