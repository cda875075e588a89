//! Storage layer for the cache
//!
//! Contains the medium contract the store writes through, an in-memory
//! implementation, and capacity estimation heuristics.

pub mod capacity;
pub mod medium;
pub mod memory;

// Re-export commonly used types
pub use capacity::{CapacityEstimator, ClientCapacity, ClientFamily, FixedCapacity, UnknownCapacity};
pub use medium::{CapacityError, StorageMedium};
pub use memory::MemoryMedium;
