//! Codec errors
//!
//! Every error aborts the current call. Traversal errors carry the path of
//! the offending position (`$`, `$.pets[0].name`).

use thiserror::Error;

use super::coercer::CoercionError;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    /// Serialize: the value's type has no logical name
    #[error("No logical name registered for type '{type_name}'")]
    UnresolvedType { type_name: String },

    /// The specification has no definition of this name
    #[error("Resource definition '{name}' not found")]
    SchemaNotFound { name: String },

    /// Date/time value paired with a format other than date / date-time
    #[error("Unsupported format {} for {kind} value at {path}", .format.as_deref().unwrap_or("<none>"))]
    UnsupportedFormat {
        format: Option<String>,
        kind: &'static str,
        path: String,
    },

    /// Value shape disagrees with the schema node
    #[error("Expected {expected} at {path}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
        path: String,
    },

    /// No concrete type for an object schema
    #[error("No type registered for object schema '{identifier}' at {path}")]
    UnknownType { identifier: String, path: String },

    /// Target type cannot be instantiated or populated
    #[error("Cannot construct '{type_name}' at {path}: {reason}")]
    Construction {
        type_name: String,
        path: String,
        reason: String,
    },

    /// Scalar coercion failed
    #[error("Coercion failed at {path}: {source}")]
    Coercion {
        path: String,
        #[source]
        source: CoercionError,
    },

    /// `$ref` does not resolve, or resolves in a cycle
    #[error("Unresolved reference '{reference}' at {path}")]
    UnresolvedReference { reference: String, path: String },

    /// Schema nesting deeper than the configured limit
    #[error("Maximum depth {max_depth} exceeded at {path}")]
    DepthExceeded { max_depth: usize, path: String },

    /// Input text is not JSON, or output could not be encoded
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl CodecError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::UnresolvedType { .. } => "CODEC_UNRESOLVED_TYPE",
            CodecError::SchemaNotFound { .. } => "CODEC_SCHEMA_NOT_FOUND",
            CodecError::UnsupportedFormat { .. } => "CODEC_UNSUPPORTED_FORMAT",
            CodecError::UnexpectedShape { .. } => "CODEC_UNEXPECTED_SHAPE",
            CodecError::UnknownType { .. } => "CODEC_UNKNOWN_TYPE",
            CodecError::Construction { .. } => "CODEC_CONSTRUCTION_FAILED",
            CodecError::Coercion { .. } => "CODEC_COERCION_FAILED",
            CodecError::UnresolvedReference { .. } => "CODEC_UNRESOLVED_REFERENCE",
            CodecError::DepthExceeded { .. } => "CODEC_DEPTH_EXCEEDED",
            CodecError::InvalidJson(_) => "CODEC_INVALID_JSON",
        }
    }

    /// Returns the traversal path if the error has one
    pub fn path(&self) -> Option<&str> {
        match self {
            CodecError::UnsupportedFormat { path, .. }
            | CodecError::UnexpectedShape { path, .. }
            | CodecError::UnknownType { path, .. }
            | CodecError::Construction { path, .. }
            | CodecError::Coercion { path, .. }
            | CodecError::UnresolvedReference { path, .. }
            | CodecError::DepthExceeded { path, .. } => Some(path),
            CodecError::UnresolvedType { .. }
            | CodecError::SchemaNotFound { .. }
            | CodecError::InvalidJson(_) => None,
        }
    }
}
