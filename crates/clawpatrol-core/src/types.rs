//! Core types for clawpatrol-core.
//!
//! An [`Event`] is the unit shipped to the remote collector. Its `type` and
//! `severity` come from closed vocabularies ([`EventType`], [`Severity`]);
//! `metadata` is an open JSON object that is never null.

use serde::{Deserialize, Serialize};

/// Open key/value bag attached to every event.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Category of a structured event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Session,
    Gateway,
    Security,
    System,
    Monitoring,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Session => "session",
            EventType::Gateway => "gateway",
            EventType::Security => "security",
            EventType::System => "system",
            EventType::Monitoring => "monitoring",
        }
    }

    /// Parse an exact lowercase label as used on the wire.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "session" => Some(EventType::Session),
            "gateway" => Some(EventType::Gateway),
            "security" => Some(EventType::Security),
            "system" => Some(EventType::System),
            "monitoring" => Some(EventType::Monitoring),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event severity. Defaults to [`Severity::Info`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }

    /// Parse a severity label, case-insensitively. `warn` is accepted as an
    /// alias for `warning`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "info" => Some(Severity::Info),
            "warn" | "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured event, produced by the classifier or by the supervisor.
///
/// Serialises to the object that gets spread over the delivery envelope, so
/// the field names here are wire names: `type`, `severity`, `message`,
/// `metadata`, and `timestamp` when the producer pinned one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub metadata: Metadata,
    /// Caller-supplied timestamp. When set it overrides the dispatch time
    /// the sink would otherwise stamp on the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Event {
    pub fn new(event_type: EventType, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            event_type,
            message: message.into(),
            severity,
            metadata: Metadata::new(),
            timestamp: None,
        }
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}
