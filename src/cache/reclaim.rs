//! Reclamation Module
//!
//! Scans the medium for entries this cache wrote and frees the stale ones.
//! The medium is shared ground: other writers keep data there too, and the
//! scan must leave everything it does not recognize untouched.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::cache::entry::{decode, Decoded};
use crate::cache::expiry::{is_format_valid, parse_timestamp};
use crate::config::BadTimestampPolicy;
use crate::storage::StorageMedium;

// == Entry Class ==
/// What a stored string turned out to be during a scan.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EntryClass {
    /// Not JSON; another writer's plain value
    Foreign,
    /// JSON without an expiry marker; not provably ours
    Incomplete,
    /// Carries an expiry marker that no longer parses
    Malformed(String),
    /// Carries a readable expiry marker
    Recognized(NaiveDateTime),
}

// == Classify ==
/// Classifies a stored string for reclamation purposes.
///
/// Only strings carrying a readable `expireDate` marker count as this
/// cache's own; everything else is left alone or flagged.
pub(crate) fn classify(raw: &str) -> EntryClass {
    let decoded = match decode(raw) {
        Decoded::Raw(_) => return EntryClass::Foreign,
        Decoded::Entry(decoded) => decoded,
    };

    let stamp = match decoded.expire_date {
        None => return EntryClass::Incomplete,
        Some(stamp) => stamp,
    };

    if !is_format_valid(&stamp) {
        return EntryClass::Malformed(stamp);
    }
    match parse_timestamp(&stamp) {
        Ok(expire_at) => EntryClass::Recognized(expire_at),
        Err(_) => EntryClass::Malformed(stamp),
    }
}

// == Reclaimer ==
/// One reclamation pass over a medium.
pub(crate) struct Reclaimer<'a, M: StorageMedium> {
    medium: &'a mut M,
    on_bad_timestamp: BadTimestampPolicy,
    logging: bool,
}

impl<'a, M: StorageMedium> Reclaimer<'a, M> {
    // == Constructor ==
    pub(crate) fn new(
        medium: &'a mut M,
        on_bad_timestamp: BadTimestampPolicy,
        logging: bool,
    ) -> Self {
        Self {
            medium,
            on_bad_timestamp,
            logging,
        }
    }

    // == Reclaim ==
    /// Removes recognized entries expired for longer than `threshold_ms`.
    ///
    /// Foreign and incomplete strings are skipped. A malformed expiry
    /// marker is skipped or aborts the scan, per the configured policy.
    ///
    /// # Arguments
    /// * `threshold_ms` - Minimum staleness in ms before an entry goes
    /// * `now` - The current local time
    ///
    /// # Returns
    /// Total bytes freed by the pass.
    pub(crate) fn reclaim(&mut self, threshold_ms: u64, now: NaiveDateTime) -> u64 {
        let threshold = i64::try_from(threshold_ms).unwrap_or(i64::MAX);
        let mut freed: u64 = 0;

        for key in self.medium.keys() {
            let raw = match self.medium.get(&key) {
                Some(raw) => raw,
                None => continue,
            };

            match classify(&raw) {
                EntryClass::Foreign => {
                    if self.logging {
                        debug!("Key '{}' belongs to another writer, skipped", key);
                    }
                }
                EntryClass::Incomplete => {
                    if self.logging {
                        debug!("Key '{}' has no expiry marker, skipped", key);
                    }
                }
                EntryClass::Malformed(stamp) => {
                    if self.logging {
                        warn!("Key '{}' carries unreadable expire date '{}'", key, stamp);
                    }
                    if self.on_bad_timestamp == BadTimestampPolicy::Abort {
                        return freed;
                    }
                }
                EntryClass::Recognized(expire_at) => {
                    let staleness = now.signed_duration_since(expire_at).num_milliseconds();
                    if staleness > threshold {
                        self.medium.remove(&key);
                        freed += raw.len() as u64;
                        if self.logging {
                            debug!("Key '{}' expired {}ms ago, reclaimed", key, staleness);
                        }
                    }
                }
            }
        }

        freed
    }

    // == Flush Owned ==
    /// Removes every entry carrying an expiry marker, readable or not.
    ///
    /// Foreign and incomplete strings stay; flushing must never destroy
    /// another writer's data.
    ///
    /// # Returns
    /// Number of entries removed.
    pub(crate) fn flush_owned(&mut self) -> usize {
        let mut removed = 0;

        for key in self.medium.keys() {
            let raw = match self.medium.get(&key) {
                Some(raw) => raw,
                None => continue,
            };

            match classify(&raw) {
                EntryClass::Foreign | EntryClass::Incomplete => {}
                EntryClass::Malformed(_) | EntryClass::Recognized(_) => {
                    self.medium.remove(&key);
                    removed += 1;
                }
            }
        }

        removed
    }
}
