//! Storage Medium Contract
//!
//! Defines the minimal string store the cache sits on top of. Any medium
//! with get/set/remove/keys over string pairs can back a store.

use thiserror::Error;

// == Capacity Error ==
/// Returned by a medium that refuses a write for lack of space.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("storage medium rejected a {attempted}-byte write")]
pub struct CapacityError {
    /// Size in bytes of the value the medium turned away
    pub attempted: usize,
}

// == Storage Medium Trait ==
/// Capacity-bounded string store.
///
/// The cache assumes nothing about the medium beyond this contract: values
/// are opaque strings, writes may fail when space runs out, and the key set
/// can contain entries the cache never wrote.
pub trait StorageMedium {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Returns
    /// `Err(CapacityError)` if the medium cannot hold the value; the
    /// previous value (if any) must remain intact in that case.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CapacityError>;

    /// Removes the value stored under `key`. Absent keys are a no-op.
    fn remove(&mut self, key: &str);

    /// Returns a snapshot of every key currently present.
    fn keys(&self) -> Vec<String>;
}
