//! Line classifier — maps one raw log line to a structured [`Event`].
//!
//! Classification is attempted in order:
//!
//! 1. **JSON object** — a line wrapped in `{ … }` that parses as a JSON
//!    object. `type`, `message` and `severity` are lifted from the object and
//!    every field of the object is copied into `metadata`.
//! 2. **Free text** — everything else, including malformed JSON. The type and
//!    severity come from keyword scans over the lowercased line, and a
//!    bracketed `[YYYY-MM-DD HH:MM:SS]` timestamp is lifted into `metadata`.
//!
//! The classifier is pure apart from reading the clock for the fallback
//! timestamp, so it can be called from any task.

use crate::{ClassifyError, Event, EventType, Metadata, Severity};
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

static BRACKETED_TIMESTAMP: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\[(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\]"));

/// Keyword → type rules. Every rule is checked; the last match wins.
const TYPE_RULES: &[(&str, EventType)] = &[
    ("session", EventType::Session),
    ("gateway", EventType::Gateway),
    ("security", EventType::Security),
    ("monitor", EventType::Monitoring),
];

/// Keyword → severity rules. Every rule is checked; the last match wins, so
/// `critical` outranks `warn`, which outranks `error`.
const SEVERITY_RULES: &[(&str, Severity)] = &[
    ("error", Severity::Error),
    ("warn", Severity::Warning),
    ("critical", Severity::Critical),
];

/// Classify `line`, read from the file at `file_path`.
///
/// Returns `None` only when classification fails internally; the failure is
/// logged and the line is dropped. Malformed JSON is not a failure, it is
/// classified as free text.
pub fn classify(line: &str, file_path: &Path) -> Option<Event> {
    match try_classify(line, file_path) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::error!(file = %file_path.display(), error = %e, "error parsing log line");
            None
        }
    }
}

/// Fallible form of [`classify`].
pub fn try_classify(line: &str, file_path: &Path) -> Result<Event, ClassifyError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ClassifyError::EmptyLine);
    }

    let file = basename(file_path);

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(fields)) => return Ok(from_json(trimmed, file, fields)),
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "malformed JSON line, classifying as text");
            }
        }
    }

    from_text(line, trimmed, file)
}

fn from_json(trimmed: &str, file: String, fields: Metadata) -> Event {
    let event_type = fields
        .get("type")
        .and_then(Value::as_str)
        .and_then(|t| EventType::from_label(&t.to_ascii_lowercase()))
        .unwrap_or(EventType::System);
    let message = fields
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(trimmed)
        .to_string();
    let severity = fields
        .get("severity")
        .and_then(Value::as_str)
        .and_then(Severity::from_label)
        .unwrap_or_default();

    // `file` goes in first so a `file` key in the line itself replaces it.
    let mut metadata = Metadata::new();
    metadata.insert("file".to_string(), Value::String(file));
    metadata.extend(fields);

    Event {
        event_type,
        message,
        severity,
        metadata,
        timestamp: None,
    }
}

fn from_text(raw: &str, trimmed: &str, file: String) -> Result<Event, ClassifyError> {
    let pattern = BRACKETED_TIMESTAMP.as_ref().map_err(Clone::clone)?;
    let timestamp = pattern
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    let lower = trimmed.to_lowercase();
    let event_type = last_match(&lower, TYPE_RULES).unwrap_or(EventType::System);
    let severity = last_match(&lower, SEVERITY_RULES).unwrap_or_default();

    let mut metadata = Metadata::new();
    metadata.insert("file".to_string(), Value::String(file));
    metadata.insert("timestamp".to_string(), Value::String(timestamp));
    metadata.insert("raw_line".to_string(), Value::String(raw.to_string()));

    Ok(Event {
        event_type,
        message: trimmed.to_string(),
        severity,
        metadata,
        timestamp: None,
    })
}

fn last_match<T: Copy>(haystack: &str, rules: &[(&str, T)]) -> Option<T> {
    rules
        .iter()
        .filter(|(keyword, _)| haystack.contains(keyword))
        .last()
        .map(|(_, value)| *value)
}

/// Final path component, or the whole path when it has none.
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
