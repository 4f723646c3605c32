//! Observability for the codec
//!
//! Structured JSON logging of lifecycle and traversal events. Logging is
//! read-only and never affects codec results.
//!
//! ```ignore
//! use schemacodec::observability::{Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! Logger::info("SPECIFICATION_LOADED", &[("definitions", "3")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::ConfigLoaded);
        log_event_with_fields(Event::FieldSkipped, &[("field", "legacy")]);
    }
}
