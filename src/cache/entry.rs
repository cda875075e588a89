//! Cache Entry Module
//!
//! Defines the JSON envelope written to the medium and the best-effort
//! decoder that reads envelopes back, including ones other writers left
//! in a shape this cache never produces.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

// == Cache Entry ==
/// The envelope stored under every key this cache writes.
///
/// `value` holds the payload serialized to a JSON string, so the envelope
/// always nests one encoding deeper than the payload itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    /// Payload, serialized to a JSON string
    pub value: String,
    /// Expiry interval in milliseconds that produced `expire_date`
    pub period: u64,
    /// Absolute expiry timestamp (`YYYY/MM/DD HH:MM:SS`)
    #[serde(rename = "expireDate")]
    pub expire_date: String,
}

impl CacheEntry {
    // == Constructor ==
    /// Builds an envelope around a payload.
    ///
    /// # Arguments
    /// * `value` - The payload to wrap
    /// * `period` - Expiry interval in ms
    /// * `expire_date` - Resolved absolute expiry timestamp
    pub fn new(value: &Value, period: u64, expire_date: String) -> Result<Self> {
        Ok(Self {
            value: serde_json::to_string(value)?,
            period,
            expire_date,
        })
    }

    // == Encode ==
    /// Renders the envelope as the string written to the medium.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// == Decoded ==
/// Outcome of reading a stored string back.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The string carried a recognizable envelope
    Entry(DecodedEntry),
    /// The string is not JSON; another writer put it there
    Raw(String),
}

/// Envelope contents after the best-effort decode.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEntry {
    /// The payload, unwrapped one level where possible
    pub value: Value,
    /// Expiry interval in ms; 0 when absent or unreadable
    pub period: u64,
    /// Expiry timestamp; `None` when absent, empty or not a string
    pub expire_date: Option<String>,
}

impl DecodedEntry {
    // == From Envelope ==
    /// Reads envelope fields out of parsed JSON, tolerating missing or
    /// oddly-typed fields.
    ///
    /// The `value` field normally holds a JSON string one encoding deep;
    /// when that inner parse fails the text is kept as a plain string, and
    /// a non-string `value` is taken as the payload itself.
    pub fn from_envelope(envelope: &Value) -> Self {
        let value = match envelope.get("value") {
            Some(Value::String(inner)) => {
                serde_json::from_str(inner).unwrap_or_else(|_| Value::String(inner.clone()))
            }
            Some(other) => other.clone(),
            None => Value::String(String::new()),
        };

        let period = envelope
            .get("period")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let expire_date = envelope
            .get("expireDate")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            value,
            period,
            expire_date,
        }
    }
}

// == Decode ==
/// Best-effort decode of a stored string.
///
/// Any string that parses as JSON is treated as an envelope; anything else
/// comes back untouched as [`Decoded::Raw`].
pub fn decode(raw: &str) -> Decoded {
    match serde_json::from_str::<Value>(raw) {
        Ok(envelope) => Decoded::Entry(DecodedEntry::from_envelope(&envelope)),
        Err(_) => Decoded::Raw(raw.to_string()),
    }
}
