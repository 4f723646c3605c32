//! Specification: the named collection of root resource definitions
//!
//! Accepted document shapes:
//! - Swagger 2: definitions under `definitions`
//! - OpenAPI 3: definitions under `components.schemas`
//! - a bare object mapping definition names to schemas
//!
//! Root object definitions without an `x-ref-id` are stamped with the
//! reference that names them, so the type resolver can identify them.

use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use super::errors::{SchemaError, SchemaResult};
use super::types::SchemaNode;

/// Reference prefix for Swagger 2 definitions.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Reference prefix for OpenAPI 3 component schemas.
pub const COMPONENTS_PREFIX: &str = "#/components/schemas/";

/// Immutable registry of root schema nodes keyed by resource name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Specification {
    definitions: HashMap<String, SchemaNode>,
}

impl Specification {
    /// Creates an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a specification from named definitions, stamping Swagger
    /// ref ids on root object definitions.
    pub fn with_definitions<I, N>(definitions: I) -> Self
    where
        I: IntoIterator<Item = (N, SchemaNode)>,
        N: Into<String>,
    {
        let definitions = definitions
            .into_iter()
            .map(|(name, node)| {
                let name = name.into();
                let node = stamp_ref_id(node, DEFINITIONS_PREFIX, &name);
                (name, node)
            })
            .collect();
        Self { definitions }
    }

    /// Builds a specification from a parsed document.
    pub fn from_document(document: &Value) -> SchemaResult<Self> {
        let definitions = parse_definitions(document, "<document>")?
            .into_iter()
            .collect();
        Ok(Self { definitions })
    }

    pub(crate) fn from_map(definitions: HashMap<String, SchemaNode>) -> Self {
        Self { definitions }
    }

    /// Returns the root schema node for a resource name.
    ///
    /// A miss is an error; there is no default definition.
    pub fn get_resource_definition(&self, name: &str) -> SchemaResult<&SchemaNode> {
        self.definitions
            .get(name)
            .ok_or_else(|| SchemaError::not_found(name))
    }

    /// Resolves a local `$ref` such as `#/definitions/Pet`.
    pub fn resolve_reference(&self, reference: &str) -> SchemaResult<&SchemaNode> {
        let name = reference
            .strip_prefix(DEFINITIONS_PREFIX)
            .or_else(|| reference.strip_prefix(COMPONENTS_PREFIX))
            .ok_or_else(|| SchemaError::unresolved_reference(reference))?;

        self.definitions
            .get(name)
            .ok_or_else(|| SchemaError::unresolved_reference(reference))
    }

    /// Checks if a definition exists.
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Returns definition names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterates over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.definitions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the specification has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromStr for Specification {
    type Err = SchemaError;

    fn from_str(text: &str) -> SchemaResult<Self> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| SchemaError::malformed("<string>", format!("Invalid JSON: {}", e)))?;
        Self::from_document(&document)
    }
}

/// Extracts and parses the definitions of a document.
///
/// `source` names the document in error messages.
pub(crate) fn parse_definitions(
    document: &Value,
    source: &str,
) -> SchemaResult<Vec<(String, SchemaNode)>> {
    let root = document
        .as_object()
        .ok_or_else(|| SchemaError::malformed(source, "document must be a JSON object"))?;

    let (section, prefix) = if let Some(definitions) = root.get("definitions") {
        (Some(definitions), DEFINITIONS_PREFIX)
    } else if let Some(schemas) = root.get("components").and_then(|c| c.get("schemas")) {
        (Some(schemas), COMPONENTS_PREFIX)
    } else if root.contains_key("swagger") || root.contains_key("openapi") {
        (None, DEFINITIONS_PREFIX)
    } else {
        (Some(document), DEFINITIONS_PREFIX)
    };

    let Some(section) = section else {
        return Ok(Vec::new());
    };

    let entries = section
        .as_object()
        .ok_or_else(|| SchemaError::malformed(source, "definitions must be a JSON object"))?;

    let mut definitions = Vec::with_capacity(entries.len());
    for (name, raw) in entries {
        let node: SchemaNode = serde_json::from_value(raw.clone()).map_err(|e| {
            SchemaError::malformed(source, format!("definition '{}': {}", name, e))
        })?;
        definitions.push((name.clone(), stamp_ref_id(node, prefix, name)));
    }

    Ok(definitions)
}

pub(crate) fn stamp_ref_id(node: SchemaNode, prefix: &str, name: &str) -> SchemaNode {
    match node {
        SchemaNode::Object(mut schema) if schema.ref_id.is_none() => {
            schema.ref_id = Some(format!("{}{}", prefix, name));
            SchemaNode::Object(schema)
        }
        other => other,
    }
}
