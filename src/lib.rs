//! schemacodec - schema-driven JSON (de)serialization
//!
//! Converts typed object graphs to and from JSON under OpenAPI/Swagger
//! style resource definitions.
//!
//! - [`schema`]: schema nodes and the specification they live in
//! - [`resource`]: the value model and typed resources
//! - [`resolver`]: mapping between schema names and Rust types
//! - [`codec`]: the serializer itself
//! - [`observability`]: structured logging

pub mod cli;
pub mod codec;
pub mod observability;
pub mod resolver;
pub mod resource;
pub mod schema;
