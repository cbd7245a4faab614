//! Domain-specific assertion macros for clawpatrol harnesses.
//!
//! These add context to failures so it is clear which event invariant was
//! violated and for which input line.

/// Assert that an event has the expected type and severity.
///
/// ```rust
/// assert_classified!(event, EventType::Gateway, Severity::Error);
/// ```
#[macro_export]
macro_rules! assert_classified {
    ($event:expr, $ty:expr, $severity:expr) => {{
        let event: &clawpatrol_core::Event = &$event;
        let ty: clawpatrol_core::EventType = $ty;
        let severity: clawpatrol_core::Severity = $severity;
        if event.event_type != ty || event.severity != severity {
            panic!(
                "assert_classified! failed:\n  expected: {}/{}\n  actual:   {}/{}\n  message: {:?}",
                ty, severity, event.event_type, event.severity, event.message
            );
        }
    }};
}

/// Assert the structural invariants every event must satisfy: a non-empty
/// message and a `metadata.file` entry.
#[macro_export]
macro_rules! assert_event_invariants {
    ($event:expr) => {{
        let event: &clawpatrol_core::Event = &$event;
        if event.message.trim().is_empty() {
            panic!("assert_event_invariants! failed: empty message on {:?}", event);
        }
        if !event.metadata.contains_key("file") {
            panic!(
                "assert_event_invariants! failed: metadata has no `file`.\n  Available: {:?}",
                event.metadata.keys().collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert that a received wire payload has the expected `type`/`severity`/
/// `message` triple and carries `event_type` alongside `type`.
#[macro_export]
macro_rules! assert_payload {
    ($payload:expr, $ty:expr, $severity:expr, $message:expr) => {{
        let payload: &serde_json::Value = &$payload;
        let expected = serde_json::json!({
            "type": $ty,
            "event_type": $ty,
            "severity": $severity,
            "message": $message,
        });
        for key in ["type", "event_type", "severity", "message"] {
            if payload[key] != expected[key] {
                panic!(
                    "assert_payload! failed on {:?}:\n  expected: {}\n  actual:   {}\n  payload: {}",
                    key, expected[key], payload[key], payload
                );
            }
        }
    }};
}
