//! Cache Module
//!
//! Provides the synchronous cache facade with envelope encoding, expiry
//! resolution and dirty-entry reclamation over a storage medium.

pub mod entry;
pub mod expiry;
mod reclaim;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{decode, CacheEntry, Decoded, DecodedEntry};
pub use expiry::{ResolvedExpiry, DEFAULT_PERIOD_MS, TIMESTAMP_FORMAT};
pub use store::CacheStore;
