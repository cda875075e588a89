//! Request and Response models for cache operations
//!
//! This module defines the envelopes exchanged with the store: the request
//! shape callers build and the uniform report every operation returns.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::CacheRequest;
pub use responses::{CacheResponse, ResultCode};
