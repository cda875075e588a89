//! Local Cache - a synchronous key/value cache over a bounded string store
//!
//! Wraps any capacity-bounded string medium with JSON envelope encoding,
//! interval or absolute expiry, and reclamation that only ever touches
//! entries this cache can recognize as its own.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use cache::CacheStore;
pub use config::{BadTimestampPolicy, CacheConfig, CacheOptions, CleanDirty, DataType, ExpireMode};
pub use error::{CacheError, Result};
pub use models::{CacheRequest, CacheResponse, ResultCode};
pub use storage::{
    CapacityEstimator, CapacityError, ClientCapacity, ClientFamily, FixedCapacity, MemoryMedium,
    StorageMedium, UnknownCapacity,
};
