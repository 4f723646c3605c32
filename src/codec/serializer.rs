//! Schema-driven object serializer
//!
//! Walks a value and a schema node in lockstep. The schema decides the
//! shape of every position; the value only supplies data.
//!
//! Serialization drops empty fields (see [`Value::is_empty`]), so `""`,
//! `"0"`, `0`, `false` and empty collections do not survive a round trip.

use std::any::TypeId;

use serde_json::{Map, Value as Json};

use super::coercer::{json_kind, ParameterCoercer, ScalarCoercer};
use super::config::CodecConfig;
use super::datetime::{format_date, format_date_as_date_time, format_date_time};
use super::errors::{CodecError, CodecResult};
use crate::observability::{log_event_with_fields, Event};
use crate::resolver::TypeResolver;
use crate::resource::{Resource, Value};
use crate::schema::{ObjectSchema, SchemaNode, Specification, FORMAT_DATE, FORMAT_DATE_TIME};

/// Path of the root position.
pub const ROOT_PATH: &str = "$";

/// Two-way conversion between typed values and JSON text.
pub trait Serializer {
    /// Serializes a resource under its registered schema.
    fn serialize(&self, data: &dyn Resource, specification: &Specification) -> CodecResult<String>;

    /// Deserializes JSON text against the named schema.
    fn deserialize(
        &self,
        data: &str,
        type_name: &str,
        specification: &Specification,
    ) -> CodecResult<Value>;
}

/// The schema-driven [`Serializer`].
///
/// Stateless apart from its collaborators; share it freely across threads.
#[derive(Debug, Clone)]
pub struct ObjectSerializer<R, C = ParameterCoercer> {
    resolver: R,
    coercer: C,
    config: CodecConfig,
}

impl<R: TypeResolver> ObjectSerializer<R> {
    /// Creates a serializer with the default coercer and configuration.
    pub fn new(resolver: R) -> Self {
        Self::with_coercer(resolver, ParameterCoercer)
    }
}

impl<R: TypeResolver, C: ScalarCoercer> ObjectSerializer<R, C> {
    /// Creates a serializer with a custom scalar coercer.
    pub fn with_coercer(resolver: R, coercer: C) -> Self {
        Self {
            resolver,
            coercer,
            config: CodecConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Serializes any value under an explicitly named root definition.
    pub fn serialize_as(
        &self,
        value: &Value,
        type_name: &str,
        specification: &Specification,
    ) -> CodecResult<String> {
        let result = lookup(specification, type_name)
            .and_then(|node| self.export(value, node, specification))
            .and_then(|plain| self.encode(&plain));
        observe(Event::SerializeComplete, "serialize", type_name, result)
    }

    /// Exports a value against a node into a plain JSON tree.
    pub fn export(
        &self,
        value: &Value,
        node: &SchemaNode,
        specification: &Specification,
    ) -> CodecResult<Json> {
        let walk = Walk::new(specification, &self.config);
        self.export_node(&walk, value, node, ROOT_PATH, 0)
    }

    /// Imports a parsed JSON tree against a node.
    pub fn import(
        &self,
        json: &Json,
        node: &SchemaNode,
        specification: &Specification,
    ) -> CodecResult<Value> {
        let walk = Walk::new(specification, &self.config);
        self.import_node(&walk, json, node, ROOT_PATH, 0)
    }

    /// Deserializes into a concrete registered type.
    pub fn deserialize_as<T: Resource>(
        &self,
        data: &str,
        specification: &Specification,
    ) -> CodecResult<T> {
        let type_name = std::any::type_name::<T>();
        let name = self
            .resolver
            .identifier_for_type_id(TypeId::of::<T>())
            .ok_or_else(|| CodecError::UnresolvedType {
                type_name: type_name.to_string(),
            })?;

        let value = self.deserialize(data, name, specification)?;
        let found = value.kind();
        value.into_resource::<T>().ok_or_else(|| CodecError::Construction {
            type_name: type_name.to_string(),
            path: ROOT_PATH.to_string(),
            reason: format!("root decoded as {} of another type", found),
        })
    }

    fn encode(&self, plain: &Json) -> CodecResult<String> {
        let text = if self.config.pretty {
            serde_json::to_string_pretty(plain)?
        } else {
            serde_json::to_string(plain)?
        };
        Ok(text)
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    fn export_node(
        &self,
        walk: &Walk<'_>,
        value: &Value,
        node: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> CodecResult<Json> {
        let node = walk.enter(node, path, depth)?;

        match value {
            Value::Date(date) => {
                return match node.format() {
                    Some(FORMAT_DATE) => Ok(Json::String(format_date(date))),
                    Some(FORMAT_DATE_TIME) => Ok(Json::String(format_date_as_date_time(date))),
                    other => Err(unsupported_format(other, value, path)),
                };
            }
            Value::DateTime(dt) => {
                return match node.format() {
                    Some(FORMAT_DATE) => Ok(Json::String(format_date(&dt.date_naive()))),
                    Some(FORMAT_DATE_TIME) => Ok(Json::String(format_date_time(dt))),
                    other => Err(unsupported_format(other, value, path)),
                };
            }
            _ => {}
        }

        match node {
            SchemaNode::Array { items } => {
                let Value::Array(elements) = value else {
                    return Err(shape("array", value.kind(), path));
                };
                elements
                    .iter()
                    .enumerate()
                    .map(|(i, element)| {
                        self.export_node(walk, element, items, &index_path(path, i), depth + 1)
                    })
                    .collect::<CodecResult<Vec<_>>>()
                    .map(Json::Array)
            }
            SchemaNode::Object(schema) => {
                let resource = value
                    .as_resource()
                    .ok_or_else(|| shape("object", value.kind(), path))?;
                self.export_resource(walk, resource, schema, path, depth)
            }
            SchemaNode::Reference(reference) => Err(unresolved(reference, path)),
            scalar => {
                if value.is_scalar() {
                    Ok(value.to_plain_json())
                } else {
                    Err(shape(scalar.type_name(), value.kind(), path))
                }
            }
        }
    }

    fn export_resource(
        &self,
        walk: &Walk<'_>,
        resource: &dyn Resource,
        schema: &ObjectSchema,
        path: &str,
        depth: usize,
    ) -> CodecResult<Json> {
        let mut out = Map::new();

        for name in resource.field_names() {
            let Some(field) = resource.field(name) else {
                continue;
            };
            if field.is_empty() {
                continue;
            }
            let exported = match schema.property(name) {
                Some(property) => {
                    self.export_node(walk, &field, property, &field_path(path, name), depth + 1)?
                }
                None => field.to_plain_json(),
            };
            out.insert(name.to_string(), exported);
        }

        Ok(Json::Object(out))
    }

    // ------------------------------------------------------------------
    // Import
    // ------------------------------------------------------------------

    fn import_node(
        &self,
        walk: &Walk<'_>,
        json: &Json,
        node: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> CodecResult<Value> {
        let node = walk.enter(node, path, depth)?;

        match node {
            // Absent container
            SchemaNode::Array { .. } | SchemaNode::Object(_) if json.is_null() => Ok(Value::Null),
            SchemaNode::Array { items } => {
                let elements = json
                    .as_array()
                    .ok_or_else(|| shape("array", json_kind(json), path))?;
                elements
                    .iter()
                    .enumerate()
                    .map(|(i, element)| {
                        self.import_node(walk, element, items, &index_path(path, i), depth + 1)
                    })
                    .collect::<CodecResult<Vec<_>>>()
                    .map(Value::Array)
            }
            SchemaNode::Object(schema) => {
                let entries = json
                    .as_object()
                    .ok_or_else(|| shape("object", json_kind(json), path))?;
                self.import_resource(walk, entries, schema, path, depth)
            }
            SchemaNode::Reference(reference) => Err(unresolved(reference, path)),
            scalar => self
                .coercer
                .coerce(scalar, json)
                .map_err(|source| CodecError::Coercion {
                    path: path.to_string(),
                    source,
                }),
        }
    }

    fn import_resource(
        &self,
        walk: &Walk<'_>,
        entries: &Map<String, Json>,
        schema: &ObjectSchema,
        path: &str,
        depth: usize,
    ) -> CodecResult<Value> {
        let descriptor =
            self.resolver
                .concrete_type_for_schema(schema)
                .map_err(|_| CodecError::UnknownType {
                    identifier: schema.identifier().unwrap_or("<anonymous>").to_string(),
                    path: path.to_string(),
                })?;

        let mut resource =
            descriptor
                .instantiate(schema)
                .ok_or_else(|| CodecError::Construction {
                    type_name: descriptor.type_name().to_string(),
                    path: path.to_string(),
                    reason: "type is abstract".to_string(),
                })?;

        for (name, raw) in entries {
            let member = field_path(path, name);
            if !resource.has_field(name) {
                log_event_with_fields(
                    Event::FieldSkipped,
                    &[("path", member.as_str()), ("type", descriptor.type_name())],
                );
                continue;
            }

            let value = match schema.property(name) {
                Some(property) => self.import_node(walk, raw, property, &member, depth + 1)?,
                None => Value::from_json(raw.clone()),
            };

            resource
                .set_field(name, value)
                .map_err(|e| CodecError::Construction {
                    type_name: descriptor.type_name().to_string(),
                    path: member,
                    reason: e.to_string(),
                })?;
        }

        Ok(Value::Object(resource))
    }
}

impl<R: TypeResolver, C: ScalarCoercer> Serializer for ObjectSerializer<R, C> {
    fn serialize(&self, data: &dyn Resource, specification: &Specification) -> CodecResult<String> {
        let result = self
            .resolver
            .identifier_for_concrete_type(data)
            .map_err(|_| CodecError::UnresolvedType {
                type_name: data.rust_type_name().to_string(),
            });
        let type_name = match &result {
            Ok(name) => name.clone(),
            Err(_) => data.rust_type_name().to_string(),
        };

        let result = result.and_then(|name| {
            let walk = Walk::new(specification, &self.config);
            let node = walk.enter(lookup(specification, &name)?, ROOT_PATH, 0)?;
            let plain = match node {
                SchemaNode::Object(schema) => {
                    self.export_resource(&walk, data, schema, ROOT_PATH, 0)?
                }
                other => return Err(shape(other.type_name(), "object", ROOT_PATH)),
            };
            self.encode(&plain)
        });
        observe(Event::SerializeComplete, "serialize", &type_name, result)
    }

    fn deserialize(
        &self,
        data: &str,
        type_name: &str,
        specification: &Specification,
    ) -> CodecResult<Value> {
        let result = serde_json::from_str::<Json>(data)
            .map_err(CodecError::from)
            .and_then(|json| {
                let node = lookup(specification, type_name)?;
                self.import(&json, node, specification)
            });
        observe(Event::DeserializeComplete, "deserialize", type_name, result)
    }
}

/// Per-call traversal state.
struct Walk<'s> {
    specification: &'s Specification,
    max_depth: Option<usize>,
}

impl<'s> Walk<'s> {
    fn new(specification: &'s Specification, config: &CodecConfig) -> Self {
        Self {
            specification,
            max_depth: config.max_depth,
        }
    }

    /// Checks the depth limit and follows `$ref` chains to a concrete node.
    ///
    /// Depth counts schema nesting only; `$ref` hops are free. A chain
    /// longer than the number of definitions is a cycle.
    fn enter<'n>(
        &self,
        node: &'n SchemaNode,
        path: &str,
        depth: usize,
    ) -> CodecResult<&'n SchemaNode>
    where
        's: 'n,
    {
        if let Some(max_depth) = self.max_depth {
            if depth > max_depth {
                return Err(CodecError::DepthExceeded {
                    max_depth,
                    path: path.to_string(),
                });
            }
        }

        let mut current = node;
        let mut hops = 0;

        loop {
            let SchemaNode::Reference(reference) = current else {
                return Ok(current);
            };
            if hops > self.specification.len() {
                return Err(unresolved(reference, path));
            }
            current = self
                .specification
                .resolve_reference(reference)
                .map_err(|_| unresolved(reference, path))?;
            hops += 1;
        }
    }
}

fn lookup<'s>(specification: &'s Specification, name: &str) -> CodecResult<&'s SchemaNode> {
    specification
        .get_resource_definition(name)
        .map_err(|_| CodecError::SchemaNotFound {
            name: name.to_string(),
        })
}

/// Logs the outcome of a public call.
fn observe<T>(event: Event, operation: &str, type_name: &str, result: CodecResult<T>) -> CodecResult<T> {
    match &result {
        Ok(_) => log_event_with_fields(event, &[("type", type_name)]),
        Err(e) => log_event_with_fields(
            Event::CodecFailed,
            &[
                ("operation", operation),
                ("type", type_name),
                ("code", e.code()),
                ("path", e.path().unwrap_or(ROOT_PATH)),
                ("error", e.to_string().as_str()),
            ],
        ),
    }
    result
}

fn field_path(prefix: &str, field: &str) -> String {
    format!("{}.{}", prefix, field)
}

fn index_path(prefix: &str, index: usize) -> String {
    format!("{}[{}]", prefix, index)
}

fn shape(expected: &'static str, found: &'static str, path: &str) -> CodecError {
    CodecError::UnexpectedShape {
        expected,
        found,
        path: path.to_string(),
    }
}

fn unresolved(reference: &str, path: &str) -> CodecError {
    CodecError::UnresolvedReference {
        reference: reference.to_string(),
        path: path.to_string(),
    }
}

fn unsupported_format(format: Option<&str>, value: &Value, path: &str) -> CodecError {
    CodecError::UnsupportedFormat {
        format: format.map(str::to_string),
        kind: value.kind(),
        path: path.to_string(),
    }
}
