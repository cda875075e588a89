//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache library.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Request failed validation before any storage access
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Expiry timestamp does not match the recognized format
    #[error("timestamp `{0}` does not match YYYY/MM/DD HH:MM:SS")]
    InvalidFormat(String),

    /// Absolute expiry timestamp is at or before the current time
    #[error("expire date {0} is not in the future")]
    ExpiredOnArrival(String),

    /// Storage medium rejected a write, even after reclamation
    #[error(transparent)]
    Capacity(#[from] crate::storage::CapacityError),

    /// Payload could not be serialized into an entry
    #[error("payload cannot be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration options are invalid
    #[error("invalid configuration: {0}")]
    Config(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
