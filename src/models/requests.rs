//! Request models for cache operations
//!
//! Defines the envelope callers hand to the store for every operation.

use serde::Deserialize;
use serde_json::Value;

/// Request envelope shared by all store operations
///
/// # Fields
/// - `key_name`: The cache key to operate on
/// - `value`: The payload to store (save/update only)
/// - `period`: Optional expiry interval in milliseconds
/// - `expire_date`: Optional absolute expiry timestamp (`YYYY/MM/DD HH:MM:SS`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRequest {
    /// The cache key
    pub key_name: String,
    /// The payload to store
    #[serde(default)]
    pub value: Value,
    /// Optional expiry interval in milliseconds
    #[serde(default)]
    pub period: Option<u64>,
    /// Optional absolute expiry timestamp
    #[serde(default)]
    pub expire_date: Option<String>,
}

impl CacheRequest {
    /// Creates a request naming only a key.
    pub fn key(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            value: Value::Null,
            period: None,
            expire_date: None,
        }
    }

    /// Sets the payload to store.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    /// Sets the expiry interval in milliseconds.
    pub fn with_period(mut self, period: u64) -> Self {
        self.period = Some(period);
        self
    }

    /// Sets the absolute expiry timestamp.
    pub fn with_expire_date(mut self, expire_date: impl Into<String>) -> Self {
        self.expire_date = Some(expire_date.into());
        self
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key_name.is_empty() {
            return Some("keyName must not be empty".to_string());
        }
        None
    }
}
