//! Schema error types
//!
//! Error codes:
//! - SCHEMA_NOT_FOUND (REJECT)
//! - SCHEMA_UNRESOLVED_REFERENCE (REJECT)
//! - SCHEMA_MALFORMED (FATAL)
//! - SCHEMA_DUPLICATE (FATAL)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The current call is rejected
    Reject,
    /// The specification cannot be used at all
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Resource definition not found
    SchemaNotFound,
    /// `$ref` does not point at a known definition
    SchemaUnresolvedReference,
    /// Document or file could not be read as a specification
    SchemaMalformed,
    /// Definition name declared twice
    SchemaDuplicate,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::SchemaNotFound => "SCHEMA_NOT_FOUND",
            SchemaErrorCode::SchemaUnresolvedReference => "SCHEMA_UNRESOLVED_REFERENCE",
            SchemaErrorCode::SchemaMalformed => "SCHEMA_MALFORMED",
            SchemaErrorCode::SchemaDuplicate => "SCHEMA_DUPLICATE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::SchemaNotFound | SchemaErrorCode::SchemaUnresolvedReference => {
                Severity::Reject
            }
            SchemaErrorCode::SchemaMalformed | SchemaErrorCode::SchemaDuplicate => Severity::Fatal,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with full context
#[derive(Debug)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// Definition name or reference if applicable
    name: Option<String>,
}

impl SchemaError {
    /// Create a definition-not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::SchemaNotFound,
            message: format!("Resource definition '{}' not found", name),
            name: Some(name),
        }
    }

    /// Create an unresolved reference error
    pub fn unresolved_reference(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        Self {
            code: SchemaErrorCode::SchemaUnresolvedReference,
            message: format!("Reference '{}' does not name a definition", reference),
            name: Some(reference),
        }
    }

    /// Create an error for a malformed specification source
    pub fn malformed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::SchemaMalformed,
            message: format!("Malformed specification '{}': {}", source.into(), reason.into()),
            name: None,
        }
    }

    /// Create a duplicate definition error
    pub fn duplicate(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::SchemaDuplicate,
            message: format!("Resource definition '{}' declared more than once", name),
            name: Some(name),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the definition name or reference if applicable
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::SchemaNotFound.code(), "SCHEMA_NOT_FOUND");
        assert_eq!(
            SchemaErrorCode::SchemaUnresolvedReference.code(),
            "SCHEMA_UNRESOLVED_REFERENCE"
        );
        assert_eq!(SchemaErrorCode::SchemaMalformed.code(), "SCHEMA_MALFORMED");
        assert_eq!(SchemaErrorCode::SchemaDuplicate.code(), "SCHEMA_DUPLICATE");
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(SchemaErrorCode::SchemaNotFound.severity(), Severity::Reject);
        assert_eq!(SchemaErrorCode::SchemaMalformed.severity(), Severity::Fatal);
        assert!(SchemaError::duplicate("Pet").is_fatal());
        assert!(!SchemaError::not_found("Pet").is_fatal());
    }

    #[test]
    fn test_display_includes_code_and_name() {
        let err = SchemaError::not_found("Pet");
        let display = format!("{}", err);
        assert!(display.contains("REJECT"));
        assert!(display.contains("SCHEMA_NOT_FOUND"));
        assert!(display.contains("Pet"));
        assert_eq!(err.name(), Some("Pet"));
    }
}
