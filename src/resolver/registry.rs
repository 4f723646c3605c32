//! Type registry: the mapping table between logical names and Rust types
//!
//! Built once, read-only afterwards.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use super::errors::{ResolverError, ResolverResult};
use super::TypeResolver;
use crate::resource::{BlankConstruct, DynamicResource, Resource};
use crate::schema::ObjectSchema;

/// Builds a blank instance for an object schema.
pub type Constructor = fn(&ObjectSchema) -> Box<dyn Resource>;

fn construct_blank<T: BlankConstruct>(_schema: &ObjectSchema) -> Box<dyn Resource> {
    Box::new(T::blank())
}

fn construct_dynamic(schema: &ObjectSchema) -> Box<dyn Resource> {
    Box::new(DynamicResource::from_schema(schema))
}

/// A concrete type known to the resolver.
#[derive(Clone)]
pub struct TypeDescriptor {
    /// Logical schema name
    name: String,
    /// Concrete type
    type_id: TypeId,
    /// Rust type name for diagnostics
    type_name: &'static str,
    /// Blank constructor; `None` for abstract types
    constructor: Option<Constructor>,
}

impl TypeDescriptor {
    /// Descriptor for an instantiable type.
    pub fn of<T: BlankConstruct>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            constructor: Some(construct_blank::<T> as Constructor),
        }
    }

    /// Descriptor for a type that can be serialized but not instantiated.
    pub fn abstract_of<T: Resource>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            constructor: None,
        }
    }

    fn dynamic() -> Self {
        Self {
            name: String::new(),
            type_id: TypeId::of::<DynamicResource>(),
            type_name: std::any::type_name::<DynamicResource>(),
            constructor: Some(construct_dynamic as Constructor),
        }
    }

    /// Logical schema name. Empty for the dynamic fallback.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concrete type id.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether instances cannot be constructed.
    pub fn is_abstract(&self) -> bool {
        self.constructor.is_none()
    }

    /// Constructs a blank instance, or `None` for abstract types.
    pub fn instantiate(&self, schema: &ObjectSchema) -> Option<Box<dyn Resource>> {
        self.constructor.map(|construct| construct(schema))
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("abstract", &self.is_abstract())
            .finish()
    }
}

/// Mapping table between logical names and Rust types.
///
/// A type registered under several names serializes under the first one;
/// every name deserializes into it.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    by_name: HashMap<String, TypeDescriptor>,
    by_type: HashMap<TypeId, String>,
    dynamic_fallback: Option<TypeDescriptor>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps unregistered object schemas to [`DynamicResource`].
    pub fn with_dynamic_fallback(mut self) -> Self {
        self.dynamic_fallback = Some(TypeDescriptor::dynamic());
        self
    }

    /// Whether the dynamic fallback is enabled.
    pub fn has_dynamic_fallback(&self) -> bool {
        self.dynamic_fallback.is_some()
    }

    /// Registers an instantiable type under a logical name.
    pub fn register<T: BlankConstruct>(&mut self, name: impl Into<String>) -> ResolverResult<()> {
        self.insert(TypeDescriptor::of::<T>(name))
    }

    /// Registers a serialize-only type under a logical name.
    pub fn register_abstract<T: Resource>(&mut self, name: impl Into<String>) -> ResolverResult<()> {
        self.insert(TypeDescriptor::abstract_of::<T>(name))
    }

    /// Registers a prepared descriptor.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> ResolverResult<()> {
        if self.by_name.contains_key(&descriptor.name) {
            return Err(ResolverError::DuplicateName(descriptor.name));
        }
        self.by_type
            .entry(descriptor.type_id)
            .or_insert_with(|| descriptor.name.clone());
        self.by_name.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Looks up a descriptor by logical name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.by_name.get(name)
    }

    /// Logical name of a Rust type.
    pub fn name_of<T: 'static>(&self) -> Option<&str> {
        self.by_type.get(&TypeId::of::<T>()).map(String::as_str)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no names are registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl TypeResolver for TypeRegistry {
    fn identifier_for_concrete_type(&self, resource: &dyn Resource) -> ResolverResult<String> {
        if let Some(name) = self.by_type.get(&resource.as_any().type_id()) {
            return Ok(name.clone());
        }
        resource
            .resource_name()
            .map(str::to_string)
            .ok_or_else(|| ResolverError::UnregisteredType(resource.rust_type_name().to_string()))
    }

    fn identifier_for_type_id(&self, type_id: TypeId) -> Option<&str> {
        self.by_type.get(&type_id).map(String::as_str)
    }

    fn concrete_type_for_schema(&self, schema: &ObjectSchema) -> ResolverResult<&TypeDescriptor> {
        let registered = self
            .identifier_for_schema(schema)
            .and_then(|identifier| self.by_name.get(identifier));

        registered
            .or(self.dynamic_fallback.as_ref())
            .ok_or_else(|| ResolverError::UnknownSchema {
                identifier: schema.identifier().map(str::to_string),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;

    crate::resource! {
        struct Pet {
            name: String,
        }
    }

    crate::resource! {
        struct Animal {
            legs: i64,
        }
    }

    fn pet_schema() -> ObjectSchema {
        ObjectSchema::new()
            .with_property("name", SchemaNode::string())
            .with_ref_id("#/definitions/Pet")
    }

    #[test]
    fn test_identifier_for_registered_type() {
        let mut registry = TypeRegistry::new();
        registry.register::<Pet>("Pet").unwrap();

        let pet = Pet::blank();
        assert_eq!(registry.identifier_for_concrete_type(&pet).unwrap(), "Pet");
        assert_eq!(registry.name_of::<Pet>(), Some("Pet"));
        assert_eq!(registry.identifier_for_type_id(TypeId::of::<Pet>()), Some("Pet"));
    }

    #[test]
    fn test_unregistered_type() {
        let registry = TypeRegistry::new();
        let err = registry
            .identifier_for_concrete_type(&Animal::blank())
            .unwrap_err();
        assert!(matches!(err, ResolverError::UnregisteredType(ref name) if name.ends_with("Animal")));
        assert_eq!(err.code(), "RESOLVER_UNKNOWN_TYPE");
    }

    #[test]
    fn test_concrete_type_for_schema() {
        let mut registry = TypeRegistry::new();
        registry.register::<Pet>("Pet").unwrap();

        let descriptor = registry.concrete_type_for_schema(&pet_schema()).unwrap();
        assert_eq!(descriptor.name(), "Pet");
        assert_eq!(descriptor.type_id(), TypeId::of::<Pet>());

        let instance = descriptor.instantiate(&pet_schema()).unwrap();
        assert_eq!(instance.field_names(), vec!["name"]);
    }

    #[test]
    fn test_schema_without_mapping() {
        let registry = TypeRegistry::new();
        let err = registry.concrete_type_for_schema(&pet_schema()).unwrap_err();
        assert_eq!(
            err,
            ResolverError::UnknownSchema {
                identifier: Some("Pet".into())
            }
        );

        let err = registry.concrete_type_for_schema(&ObjectSchema::new()).unwrap_err();
        assert_eq!(err, ResolverError::UnknownSchema { identifier: None });
    }

    #[test]
    fn test_duplicate_name() {
        let mut registry = TypeRegistry::new();
        registry.register::<Pet>("Pet").unwrap();
        assert_eq!(
            registry.register::<Animal>("Pet"),
            Err(ResolverError::DuplicateName("Pet".into()))
        );
    }

    #[test]
    fn test_alias_keeps_first_name() {
        let mut registry = TypeRegistry::new();
        registry.register::<Pet>("Pet").unwrap();
        registry.register::<Pet>("LegacyPet").unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name_of::<Pet>(), Some("Pet"));

        let legacy = ObjectSchema::new().with_ref_id("#/definitions/LegacyPet");
        assert_eq!(
            registry.concrete_type_for_schema(&legacy).unwrap().type_id(),
            TypeId::of::<Pet>()
        );
    }

    #[test]
    fn test_abstract_type_not_instantiable() {
        let mut registry = TypeRegistry::new();
        registry.register_abstract::<Pet>("Pet").unwrap();

        let descriptor = registry.concrete_type_for_schema(&pet_schema()).unwrap();
        assert!(descriptor.is_abstract());
        assert!(descriptor.instantiate(&pet_schema()).is_none());
    }

    #[test]
    fn test_dynamic_fallback() {
        let registry = TypeRegistry::new().with_dynamic_fallback();
        assert!(registry.has_dynamic_fallback());

        let descriptor = registry.concrete_type_for_schema(&pet_schema()).unwrap();
        let instance = descriptor.instantiate(&pet_schema()).unwrap();
        assert_eq!(instance.resource_name(), Some("Pet"));
        assert_eq!(registry.identifier_for_concrete_type(instance.as_ref()).unwrap(), "Pet");
    }
}
