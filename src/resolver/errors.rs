//! Type resolution errors

use thiserror::Error;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Type resolution errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolverError {
    /// Concrete type was never registered
    #[error("Type '{0}' is not registered")]
    UnregisteredType(String),

    /// Schema node carries no identifier or one without a registered type
    #[error("No type registered for schema {}", .identifier.as_deref().unwrap_or("<anonymous>"))]
    UnknownSchema { identifier: Option<String> },

    /// Logical name registered twice
    #[error("Name '{0}' is already registered")]
    DuplicateName(String),
}

impl ResolverError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            ResolverError::UnregisteredType(_) | ResolverError::UnknownSchema { .. } => {
                "RESOLVER_UNKNOWN_TYPE"
            }
            ResolverError::DuplicateName(_) => "RESOLVER_DUPLICATE_NAME",
        }
    }
}
