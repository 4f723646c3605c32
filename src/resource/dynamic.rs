//! Schema-shaped resource without a Rust type
//!
//! The field set is the property set of the object schema it was built
//! from, ordered by name.

use std::any::Any;

use super::{FieldError, Resource, Value};
use crate::schema::ObjectSchema;

/// Name used when the schema carries no ref id.
pub const ANONYMOUS_RESOURCE: &str = "object";

/// A resource whose fields are taken from an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicResource {
    name: String,
    fields: Vec<(String, Value)>,
}

impl DynamicResource {
    /// Blank instance shaped by the schema: one `Null` field per property.
    pub fn from_schema(schema: &ObjectSchema) -> Self {
        let mut names: Vec<&String> = schema.properties.keys().collect();
        names.sort();

        Self {
            name: schema
                .identifier()
                .unwrap_or(ANONYMOUS_RESOURCE)
                .to_string(),
            fields: names
                .into_iter()
                .map(|name| (name.clone(), Value::Null))
                .collect(),
        }
    }

    /// Builds an instance from explicit fields, keeping their order.
    pub fn with_fields(name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Logical name of the resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in order.
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }
}

impl Resource for DynamicResource {
    fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(FieldError::UnknownField(name.to_string())),
        }
    }

    fn resource_name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn clone_resource(&self) -> Box<dyn Resource> {
        Box::new(self.clone())
    }

    fn eq_resource(&self, other: &dyn Resource) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .map_or(false, |other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
