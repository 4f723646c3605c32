//! Schema-driven JSON codec
//!
//! Serialization walks a typed value against its schema definition and
//! emits sparse JSON. Deserialization walks parsed JSON against a named
//! definition and builds typed resources through the type resolver.
//!
//! ```ignore
//! use schemacodec::codec::{ObjectSerializer, Serializer};
//! use schemacodec::resolver::TypeRegistry;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Pet>("Pet")?;
//! let codec = ObjectSerializer::new(registry);
//!
//! let text = codec.serialize(&pet, &specification)?;
//! let back: Pet = codec.deserialize_as(&text, &specification)?;
//! ```

mod coercer;
mod config;
pub mod datetime;
mod errors;
mod serializer;

pub use coercer::{CoercionError, ParameterCoercer, ScalarCoercer};
pub use config::{CodecConfig, ConfigError};
pub use errors::{CodecError, CodecResult};
pub use serializer::{ObjectSerializer, Serializer, ROOT_PATH};
