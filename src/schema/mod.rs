//! Schema subsystem
//!
//! Schema nodes are traversal guides for the codec, not validation rules.
//! A [`Specification`] is loaded once and read-only afterwards.

mod errors;
mod loader;
mod specification;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use loader::SpecificationLoader;
pub use specification::{Specification, COMPONENTS_PREFIX, DEFINITIONS_PREFIX};
pub use types::{ObjectSchema, SchemaNode, FORMAT_DATE, FORMAT_DATE_TIME};
