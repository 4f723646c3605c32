//! Schema node definitions
//!
//! Supported node kinds:
//! - array: ordered sequence with a single `items` schema
//! - object: resource with named `properties`
//! - string / number / integer: scalars with an optional `format`
//! - boolean
//! - `$ref`: reference to a named resource definition, resolved lazily

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Format name for calendar dates (`YYYY-MM-DD`).
pub const FORMAT_DATE: &str = "date";

/// Format name for timestamps with a numeric UTC offset.
pub const FORMAT_DATE_TIME: &str = "date-time";

/// A schema fragment guiding traversal of one value position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodeRepr", into = "NodeRepr")]
pub enum SchemaNode {
    /// Reference to a root definition, e.g. `#/definitions/Pet`
    Reference(String),
    /// Homogeneous ordered sequence
    Array {
        /// Element schema (boxed for recursion)
        items: Box<SchemaNode>,
    },
    /// Resource with named properties
    Object(ObjectSchema),
    /// UTF-8 string
    String {
        /// Optional format, e.g. `date` or `date-time`
        format: Option<String>,
    },
    /// Floating point number
    Number {
        /// Optional format, e.g. `double`
        format: Option<String>,
    },
    /// Integer
    Integer {
        /// Optional format, e.g. `int64`
        format: Option<String>,
    },
    /// Boolean
    Boolean,
}

impl SchemaNode {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaNode::Reference(_) => "$ref",
            SchemaNode::Array { .. } => "array",
            SchemaNode::Object(_) => "object",
            SchemaNode::String { .. } => "string",
            SchemaNode::Number { .. } => "number",
            SchemaNode::Integer { .. } => "integer",
            SchemaNode::Boolean => "boolean",
        }
    }

    /// Returns the declared format, if any.
    pub fn format(&self) -> Option<&str> {
        match self {
            SchemaNode::String { format }
            | SchemaNode::Number { format }
            | SchemaNode::Integer { format } => format.as_deref(),
            _ => None,
        }
    }

    /// Create a plain string node
    pub fn string() -> Self {
        SchemaNode::String { format: None }
    }

    /// Create a string node with `format: date`
    pub fn date() -> Self {
        SchemaNode::String {
            format: Some(FORMAT_DATE.into()),
        }
    }

    /// Create a string node with `format: date-time`
    pub fn date_time() -> Self {
        SchemaNode::String {
            format: Some(FORMAT_DATE_TIME.into()),
        }
    }

    /// Create a string node with an arbitrary format
    pub fn formatted_string(format: impl Into<String>) -> Self {
        SchemaNode::String {
            format: Some(format.into()),
        }
    }

    /// Create an integer node
    pub fn integer() -> Self {
        SchemaNode::Integer { format: None }
    }

    /// Create a number node
    pub fn number() -> Self {
        SchemaNode::Number { format: None }
    }

    /// Create a boolean node
    pub fn boolean() -> Self {
        SchemaNode::Boolean
    }

    /// Create an array node
    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array {
            items: Box::new(items),
        }
    }

    /// Create a reference to a Swagger definition by name
    pub fn reference(name: &str) -> Self {
        SchemaNode::Reference(format!("#/definitions/{}", name))
    }
}

impl From<ObjectSchema> for SchemaNode {
    fn from(schema: ObjectSchema) -> Self {
        SchemaNode::Object(schema)
    }
}

/// Object schema: property map plus the identifying ref id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Property schemas keyed by wire name
    #[serde(default)]
    pub properties: HashMap<String, SchemaNode>,
    /// Identifying reference of the definition this schema was declared as
    #[serde(rename = "x-ref-id", default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
}

impl ObjectSchema {
    /// Create an object schema without properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property schema
    pub fn with_property(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.properties.insert(name.into(), node);
        self
    }

    /// Set the identifying ref id
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    /// Looks up a property schema by name.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    /// The definition name implied by the ref id (its last path segment).
    pub fn identifier(&self) -> Option<&str> {
        let ref_id = self.ref_id.as_deref()?;
        let name = ref_id.rsplit('/').next().unwrap_or(ref_id);
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

// Wire representation. `$ref` nodes carry no `type`, everything else is
// tagged by it. Unknown keywords are ignored.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NodeRepr {
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Typed(TypedRepr),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TypedRepr {
    Array {
        items: Box<SchemaNode>,
    },
    Object(ObjectSchema),
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    Integer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    Boolean {},
}

impl From<NodeRepr> for SchemaNode {
    fn from(repr: NodeRepr) -> Self {
        match repr {
            NodeRepr::Reference { reference } => SchemaNode::Reference(reference),
            NodeRepr::Typed(TypedRepr::Array { items }) => SchemaNode::Array { items },
            NodeRepr::Typed(TypedRepr::Object(schema)) => SchemaNode::Object(schema),
            NodeRepr::Typed(TypedRepr::String { format }) => SchemaNode::String { format },
            NodeRepr::Typed(TypedRepr::Number { format }) => SchemaNode::Number { format },
            NodeRepr::Typed(TypedRepr::Integer { format }) => SchemaNode::Integer { format },
            NodeRepr::Typed(TypedRepr::Boolean {}) => SchemaNode::Boolean,
        }
    }
}

impl From<SchemaNode> for NodeRepr {
    fn from(node: SchemaNode) -> Self {
        match node {
            SchemaNode::Reference(reference) => NodeRepr::Reference { reference },
            SchemaNode::Array { items } => NodeRepr::Typed(TypedRepr::Array { items }),
            SchemaNode::Object(schema) => NodeRepr::Typed(TypedRepr::Object(schema)),
            SchemaNode::String { format } => NodeRepr::Typed(TypedRepr::String { format }),
            SchemaNode::Number { format } => NodeRepr::Typed(TypedRepr::Number { format }),
            SchemaNode::Integer { format } => NodeRepr::Typed(TypedRepr::Integer { format }),
            SchemaNode::Boolean => NodeRepr::Typed(TypedRepr::Boolean {}),
        }
    }
}
