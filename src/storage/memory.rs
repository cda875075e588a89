//! In-Memory Medium
//!
//! A byte-budgeted HashMap implementation of the storage contract, used as
//! the default backing store and throughout the test suite.

use std::collections::HashMap;

use super::medium::{CapacityError, StorageMedium};

// == Memory Medium ==
/// In-memory string store with a fixed byte budget.
///
/// Only value bytes count against the budget. Overwrites are transactional:
/// a rejected write leaves the previous value in place.
#[derive(Debug)]
pub struct MemoryMedium {
    /// Stored key/value pairs
    slots: HashMap<String, String>,
    /// Total value bytes the medium will hold
    capacity: usize,
    /// Value bytes currently held
    used: usize,
}

impl MemoryMedium {
    // == Constructor ==
    /// Creates a medium holding at most `capacity` value bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: HashMap::new(),
            capacity,
            used: 0,
        }
    }

    // == Length ==
    /// Returns the number of stored pairs.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // == Used Bytes ==
    /// Returns the value bytes currently held.
    pub fn used_bytes(&self) -> usize {
        self.used
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CapacityError> {
        let previous = self.slots.get(key).map_or(0, String::len);
        let next = self.used - previous + value.len();
        if next > self.capacity {
            return Err(CapacityError {
                attempted: value.len(),
            });
        }
        self.slots.insert(key.to_string(), value.to_string());
        self.used = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        if let Some(value) = self.slots.remove(key) {
            self.used -= value.len();
        }
    }

    fn keys(&self) -> Vec<String> {
        self.slots.keys().cloned().collect()
    }
}
