//! Client log events.
//!
//! A POST body becomes a [`LogBatch`]: the raw JSON items in submission
//! order. Stamping the batch with a [`ReceiptStamp`] keeps only the JSON
//! objects and turns each into a [`LogEvent`] carrying the server-side
//! `receivedAt` and `clientIP` fields. Anything that is not an object is
//! dropped without an error.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::error::MoblogError;

pub const RECEIVED_AT: &str = "receivedAt";
pub const CLIENT_IP: &str = "clientIP";

const RECEIVED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DEFAULT_TYPE: &str = "log";

/// The raw items of one POST body, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogBatch {
    items: Vec<Value>,
}

impl LogBatch {
    /// Parse a request body. An empty body is an empty batch.
    pub fn parse(body: &[u8]) -> Result<Self, MoblogError> {
        if body.is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(body).map_err(|_| MoblogError::InvalidJson)?;
        Ok(Self::from_value(value))
    }

    /// An array is used as-is; any other value becomes a one-item batch.
    pub fn from_value(value: Value) -> Self {
        let items = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        Self { items }
    }

    /// Number of raw items, objects or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keep the JSON objects, stamp them, drop everything else.
    pub fn stamp(self, stamp: &ReceiptStamp) -> Vec<LogEvent> {
        self.items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(fields) => Some(stamp.apply(fields)),
                _ => None,
            })
            .collect()
    }
}

/// Server-side fields injected into every accepted event of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptStamp {
    received_at: String,
    client_ip: String,
}

impl ReceiptStamp {
    pub fn new(received_at: DateTime<Utc>, client_ip: impl Into<String>) -> Self {
        Self {
            received_at: received_at.format(RECEIVED_AT_FORMAT).to_string(),
            client_ip: client_ip.into(),
        }
    }

    pub fn now(client_ip: impl Into<String>) -> Self {
        Self::new(Utc::now(), client_ip)
    }

    pub fn received_at(&self) -> &str {
        &self.received_at
    }

    pub fn client_ip(&self) -> &str {
        &self.client_ip
    }

    /// Merge the stamp into `fields`. Injected keys always win; a key the
    /// client already sent keeps its position, new keys go last.
    pub fn apply(&self, mut fields: Map<String, Value>) -> LogEvent {
        fields.insert(RECEIVED_AT.to_string(), Value::String(self.received_at.clone()));
        fields.insert(CLIENT_IP.to_string(), Value::String(self.client_ip.clone()));
        LogEvent { fields }
    }
}

/// One accepted, stamped log event.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    fields: Map<String, Value>,
}

impl LogEvent {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Compact single-line JSON, non-ASCII left unescaped.
    pub fn to_json_line(&self) -> Result<String, MoblogError> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    /// The client's `type` field, `log` when absent.
    pub fn event_type(&self) -> Cow<'_, str> {
        match self.fields.get("type") {
            None => Cow::Borrowed(DEFAULT_TYPE),
            Some(value) => display_value(value),
        }
    }

    /// First element of `args`, if `args` is a non-empty array.
    pub fn first_arg(&self) -> Option<Cow<'_, str>> {
        match self.fields.get("args") {
            Some(Value::Array(args)) => args.first().map(display_value),
            _ => None,
        }
    }

    /// Console line `[<type>] <args[0]>`, the argument cut to `max_chars`
    /// characters. The stored record is never truncated.
    pub fn summary(&self, max_chars: usize) -> String {
        let text: String = self
            .first_arg()
            .map(|arg| arg.chars().take(max_chars).collect())
            .unwrap_or_default();
        format!("[{}] {}", self.event_type(), text)
    }
}

fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}
