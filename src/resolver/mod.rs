//! Type resolution
//!
//! Schema names and Rust types are separate namespaces. The resolver is
//! the only place that translates between them, so the codec never depends
//! on naming conventions.

mod errors;
mod registry;

use std::any::TypeId;

pub use errors::{ResolverError, ResolverResult};
pub use registry::{Constructor, TypeDescriptor, TypeRegistry};

use crate::resource::Resource;
use crate::schema::ObjectSchema;

/// Translates between logical schema names and concrete types.
pub trait TypeResolver: Send + Sync {
    /// Logical schema name of a resource's concrete type.
    fn identifier_for_concrete_type(&self, resource: &dyn Resource) -> ResolverResult<String>;

    /// Logical schema name registered for a type id.
    fn identifier_for_type_id(&self, type_id: TypeId) -> Option<&str>;

    /// Concrete type to instantiate for an object schema.
    fn concrete_type_for_schema(&self, schema: &ObjectSchema) -> ResolverResult<&TypeDescriptor>;

    /// Identifier implied by an object schema: the last segment of its
    /// `x-ref-id`.
    fn identifier_for_schema<'s>(&self, schema: &'s ObjectSchema) -> Option<&'s str> {
        schema.identifier()
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    fn identifier_for_concrete_type(&self, resource: &dyn Resource) -> ResolverResult<String> {
        (**self).identifier_for_concrete_type(resource)
    }

    fn identifier_for_type_id(&self, type_id: TypeId) -> Option<&str> {
        (**self).identifier_for_type_id(type_id)
    }

    fn concrete_type_for_schema(&self, schema: &ObjectSchema) -> ResolverResult<&TypeDescriptor> {
        (**self).concrete_type_for_schema(schema)
    }

    fn identifier_for_schema<'s>(&self, schema: &'s ObjectSchema) -> Option<&'s str> {
        (**self).identifier_for_schema(schema)
    }
}
