//! Response models for cache operations
//!
//! Defines the uniform report every store operation returns.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

// == Result Code ==
/// Numeric outcome code carried in every response.
///
/// Serializes as a bare number: 0 for absent or failed, 1 for a stored or
/// structured result, 2 for a raw text result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    /// Key absent, or the operation did not take effect
    NotFound,
    /// Operation succeeded with a structured (JSON) payload
    Json,
    /// Operation succeeded with a raw text payload
    Text,
}

impl ResultCode {
    /// The numeric wire value for this code.
    pub fn code(self) -> u8 {
        match self {
            ResultCode::NotFound => 0,
            ResultCode::Json => 1,
            ResultCode::Text => 2,
        }
    }
}

impl Serialize for ResultCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

// == Cache Response ==
/// Uniform operation report
///
/// # Fields
/// - `data`: The payload, or null when there is none
/// - `result`: Numeric outcome code
/// - `msg`: Human-readable description of what happened
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CacheResponse {
    /// The payload, or null when there is none
    pub data: Value,
    /// Numeric outcome code
    pub result: ResultCode,
    /// Human-readable description
    pub msg: String,
}

impl CacheResponse {
    /// Report for a successful save.
    pub fn stored(key: &str, data: Value) -> Self {
        Self {
            data,
            result: ResultCode::Json,
            msg: format!("Key '{key}' stored successfully"),
        }
    }

    /// Report for a read that decoded a structured payload.
    pub fn found_json(key: &str, data: Value) -> Self {
        Self {
            data,
            result: ResultCode::Json,
            msg: format!("Found key '{key}' as JSON"),
        }
    }

    /// Report for a read returning the raw stored text.
    pub fn found_text(key: &str, raw: String) -> Self {
        Self {
            data: Value::String(raw),
            result: ResultCode::Text,
            msg: format!("Found key '{key}' as String"),
        }
    }

    /// Report for a read that found nothing under the key.
    pub fn not_found(key: &str) -> Self {
        Self {
            data: Value::Null,
            result: ResultCode::NotFound,
            msg: format!("Key '{key}' not found"),
        }
    }

    /// Report for a delete; deletes always succeed.
    pub fn deleted(key: &str) -> Self {
        Self {
            data: json!({ "keyName": key }),
            result: ResultCode::Json,
            msg: format!("Key '{key}' deleted successfully"),
        }
    }

    /// Report for a save the store refused or could not complete.
    pub fn rejected(key: &str, reason: &str) -> Self {
        Self {
            data: Value::Null,
            result: ResultCode::NotFound,
            msg: format!("Key '{key}' not stored: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_code_values() {
        assert_eq!(ResultCode::NotFound.code(), 0);
        assert_eq!(ResultCode::Json.code(), 1);
        assert_eq!(ResultCode::Text.code(), 2);
    }

    #[test]
    fn test_result_code_serializes_as_number() {
        let json = serde_json::to_string(&ResultCode::Text).unwrap();
        assert_eq!(json, "2");
    }

    #[test]
    fn test_stored_response_serialize() {
        let resp = CacheResponse::stored("my_key", json!({"value": "v"}));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
        assert!(json.contains("\"result\":1"));
    }

    #[test]
    fn test_not_found_response() {
        let resp = CacheResponse::not_found("missing");
        assert_eq!(resp.data, Value::Null);
        assert_eq!(resp.result, ResultCode::NotFound);
        assert!(resp.msg.contains("not found"));
    }

    #[test]
    fn test_deleted_response_carries_key() {
        let resp = CacheResponse::deleted("deleted_key");
        assert_eq!(resp.data["keyName"], "deleted_key");
        assert!(resp.msg.contains("deleted"));
    }

    #[test]
    fn test_rejected_response() {
        let resp = CacheResponse::rejected("k", "storage medium rejected a 10-byte write");
        assert_eq!(resp.result, ResultCode::NotFound);
        assert_eq!(resp.data, Value::Null);
        assert!(resp.msg.contains("not stored"));
    }

    #[test]
    fn test_found_text_wraps_raw_string() {
        let resp = CacheResponse::found_text("k", "raw payload".to_string());
        assert_eq!(resp.data, Value::String("raw payload".to_string()));
        assert_eq!(resp.result, ResultCode::Text);
    }
}
