//! Client log entries and their rendered line form

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::branding::DEFAULT_LEVEL;

/// Timestamp layout at the start of every line (millisecond precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Errors raised while turning a decoded body into an entry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    /// The body decoded to valid JSON that is not an object.
    #[error("log entry must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// A single client log entry
///
/// Both fields are plain text. Missing or `null` fields fall back to an
/// empty message and the `INFO` level; non-string values are kept as
/// their compact JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub message: String,
    pub level: String,
}

impl LogEntry {
    /// Create an entry from already-extracted fields
    pub fn new(message: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: level.into(),
        }
    }

    /// Extract an entry from a decoded JSON body
    pub fn from_json(value: &Value) -> Result<Self, EntryError> {
        let fields = value
            .as_object()
            .ok_or_else(|| EntryError::NotAnObject(json_kind(value)))?;

        Ok(Self {
            message: field_text(fields, "message").unwrap_or_default(),
            level: field_text(fields, "level").unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
        })
    }

    /// Render the entry as one newline-terminated line stamped with `at`
    ///
    /// Message and level are written verbatim: embedded brackets and
    /// newlines are not escaped.
    pub fn render_line(&self, at: DateTime<Local>) -> String {
        format!(
            "[{}] [{}] {}\n",
            at.format(TIMESTAMP_FORMAT),
            self.level,
            self.message
        )
    }

    /// Render the entry stamped with the current local time
    pub fn render_now(&self) -> String {
        self.render_line(Local::now())
    }
}

fn field_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
