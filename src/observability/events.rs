//! Observable codec events
//!
//! Events are explicit and typed, each with a fixed severity.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Codec configuration loaded
    ConfigLoaded,
    /// Specification document read
    SpecificationLoaded,
    /// Value serialized to JSON text
    SerializeComplete,
    /// JSON text deserialized into a value
    DeserializeComplete,
    /// Input key without a matching field on the target type
    FieldSkipped,
    /// A (de)serialize call failed
    CodecFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SpecificationLoaded => "SPECIFICATION_LOADED",
            Event::SerializeComplete => "SERIALIZE_COMPLETE",
            Event::DeserializeComplete => "DESERIALIZE_COMPLETE",
            Event::FieldSkipped => "FIELD_SKIPPED",
            Event::CodecFailed => "CODEC_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ConfigLoaded | Event::SpecificationLoaded => Severity::Info,
            Event::SerializeComplete | Event::DeserializeComplete | Event::FieldSkipped => {
                Severity::Trace
            }
            Event::CodecFailed => Severity::Warn,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
