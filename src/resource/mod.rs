//! Typed resources
//!
//! A resource is a plain data record whose fields the codec reads and
//! assigns by wire name. Each type declares its field set explicitly
//! through [`Resource::field_names`]; the codec never inspects storage
//! layout.
//!
//! Deserialization starts from [`BlankConstruct::blank`]: every field at its
//! zero value, without running any constructor of the type. The
//! [`resource!`](crate::resource!) macro generates both impls.

mod dynamic;
mod field;
mod macros;
mod value;

use std::any::Any;
use std::fmt;

pub use dynamic::DynamicResource;
pub use field::{FieldError, FieldValue};
pub use value::Value;

/// An object the codec can serialize and populate.
pub trait Resource: Any + fmt::Debug + Send + Sync {
    /// Wire names of the declared fields, in declaration order.
    fn field_names(&self) -> Vec<&str>;

    /// Reads a field by wire name.
    fn field(&self, name: &str) -> Option<Value>;

    /// Assigns a field by wire name.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError>;

    /// Logical name carried by the instance itself.
    ///
    /// Only schema-shaped resources know their own name; typed resources
    /// are named through the type registry.
    fn resource_name(&self) -> Option<&str> {
        None
    }

    /// Rust type name, for diagnostics.
    fn rust_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether the type declares a field with this wire name.
    fn has_field(&self, name: &str) -> bool {
        self.field_names().iter().any(|field| *field == name)
    }

    /// Clones into a new box.
    fn clone_resource(&self) -> Box<dyn Resource>;

    /// Compares with another resource of possibly different type.
    fn eq_resource(&self, other: &dyn Resource) -> bool;

    /// Upcast for downcasting by concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Owned upcast for downcasting by concrete type.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Construction path reserved for deserialization.
pub trait BlankConstruct: Resource + Sized {
    /// An instance with every field at its zero value.
    fn blank() -> Self;
}

impl Clone for Box<dyn Resource> {
    fn clone(&self) -> Self {
        self.clone_resource()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    crate::resource! {
        struct Sample {
            pub id: i64,
            pub label: String,
            pub kind: String => "type",
            pub born: Option<NaiveDate>,
            pub tags: Vec<String>,
        }
    }

    #[test]
    fn test_blank_is_zero_valued() {
        let sample = Sample::blank();
        assert_eq!(sample.id, 0);
        assert!(sample.label.is_empty());
        assert!(sample.born.is_none());
        assert!(sample.tags.is_empty());
    }

    #[test]
    fn test_field_names_use_wire_names() {
        let sample = Sample::blank();
        assert_eq!(sample.field_names(), vec!["id", "label", "type", "born", "tags"]);
        assert!(sample.has_field("type"));
        assert!(!sample.has_field("kind"));
    }

    #[test]
    fn test_get_and_set_fields() {
        let mut sample = Sample::blank();
        sample.set_field("id", Value::Integer(9)).unwrap();
        sample.set_field("type", Value::from("cat")).unwrap();
        sample
            .set_field("tags", Value::Array(vec![Value::from("a")]))
            .unwrap();

        assert_eq!(sample.id, 9);
        assert_eq!(sample.kind, "cat");
        assert_eq!(sample.field("tags"), Some(Value::Array(vec![Value::from("a")])));
        assert_eq!(sample.field("missing"), None);
    }

    #[test]
    fn test_set_field_errors() {
        let mut sample = Sample::blank();
        assert_eq!(
            sample.set_field("missing", Value::Null),
            Err(FieldError::UnknownField("missing".into()))
        );
        assert!(sample.set_field("id", Value::from("nine")).is_err());
    }

    #[test]
    fn test_object_values_downcast() {
        let mut sample = Sample::blank();
        sample.id = 3;
        let value = Value::Object(Box::new(sample.clone()));

        assert_eq!(value.clone(), value);
        assert_eq!(value.as_resource().map(|r| r.field_names().len()), Some(5));
        assert_eq!(value.into_resource::<Sample>(), Some(sample));
    }
}
