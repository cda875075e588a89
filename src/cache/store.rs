//! Cache Store Module
//!
//! The synchronous facade combining the entry codec, expiry policy and
//! reclamation over an arbitrary storage medium. Every operation takes a
//! request envelope and answers with a uniform report; requests that fail
//! validation are dropped without touching the medium.

use chrono::{Local, NaiveDateTime};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::cache::entry::{decode, CacheEntry, Decoded};
use crate::cache::expiry::resolve_expiry;
use crate::cache::reclaim::Reclaimer;
use crate::config::{CacheConfig, CacheOptions, DataType};
use crate::error::{CacheError, Result};
use crate::models::{CacheRequest, CacheResponse};
use crate::storage::{CapacityEstimator, StorageMedium, UnknownCapacity};

// == Cache Store ==
/// Key/value cache over a capacity-bounded string medium.
///
/// The medium is shared ground; the store only ever deletes data it can
/// recognize as its own. Configuration is set at construction and can be
/// swapped wholesale through [`CacheStore::reconfigure`].
pub struct CacheStore<M: StorageMedium> {
    /// The backing string store
    medium: M,
    /// Resolved configuration
    config: CacheConfig,
    /// Total-capacity heuristic for the medium
    capacity: Box<dyn CapacityEstimator>,
}

impl<M: StorageMedium> CacheStore<M> {
    // == Constructors ==
    /// Creates a store over `medium` with no capacity estimate.
    pub fn new(medium: M, config: CacheConfig) -> Self {
        Self::with_estimator(medium, config, UnknownCapacity)
    }

    /// Creates a store from raw caller options.
    ///
    /// # Returns
    /// The store, or a config error if the options fail validation.
    pub fn from_options(medium: M, options: CacheOptions) -> Result<Self> {
        Ok(Self::new(medium, CacheConfig::from_options(options)?))
    }

    /// Creates a store with an explicit capacity estimator.
    ///
    /// When the configuration names a staleness threshold, a reclamation
    /// pass runs here, before the store accepts its first request.
    pub fn with_estimator(
        medium: M,
        config: CacheConfig,
        estimator: impl CapacityEstimator + 'static,
    ) -> Self {
        let mut store = Self {
            medium,
            config,
            capacity: Box::new(estimator),
        };
        store.purge_if_configured();
        store
    }

    // == Reconfigure ==
    /// Replaces the held configuration in one assignment.
    ///
    /// When the new configuration names a staleness threshold, the same
    /// reclamation pass that runs at construction runs again here.
    pub fn reconfigure(&mut self, config: CacheConfig) {
        self.config = config;
        self.purge_if_configured();
    }

    // == Save ==
    /// Stores a payload under the request's key.
    ///
    /// Expiry is resolved from the request per the configured mode. When
    /// the medium is full and eviction is enabled, one reclamation pass
    /// runs and the write is retried once.
    ///
    /// # Returns
    /// `None` if the request fails validation; otherwise a report saying
    /// whether the payload was written.
    pub fn save(&mut self, request: &CacheRequest) -> Option<CacheResponse> {
        self.validated_key(request)?;
        Some(self.admit(request))
    }

    // == Update ==
    /// Overwrites the payload under the request's key.
    ///
    /// Updates admit exactly like saves; the previous entry (if any) is
    /// replaced wholesale.
    pub fn update(&mut self, request: &CacheRequest) -> Option<CacheResponse> {
        self.save(request)
    }

    // == Get ==
    /// Reads the value under the request's key.
    ///
    /// Expiry is not inspected on reads; an expired entry still answers
    /// until reclamation removes it. In JSON mode the stored envelope is
    /// decoded best-effort, in text mode the raw string comes back as-is.
    pub fn get(&self, request: &CacheRequest) -> Option<CacheResponse> {
        let key = self.validated_key(request)?;

        let raw = match self.medium.get(key) {
            Some(raw) => raw,
            None => return Some(CacheResponse::not_found(key)),
        };

        let response = match self.config.data_type {
            DataType::Text => CacheResponse::found_text(key, raw),
            DataType::Json => match decode(&raw) {
                // Another writer's plain value; hand it back unchanged
                Decoded::Raw(text) => CacheResponse::found_json(key, Value::String(text)),
                Decoded::Entry(entry) => CacheResponse::found_json(
                    key,
                    json!({
                        "value": entry.value,
                        "period": entry.period,
                        "expireDate": entry.expire_date.unwrap_or_default(),
                    }),
                ),
            },
        };

        Some(response)
    }

    // == Delete ==
    /// Removes the value under the request's key.
    ///
    /// Deleting an absent key succeeds; the report is the same either way.
    pub fn delete(&mut self, request: &CacheRequest) -> Option<CacheResponse> {
        let key = self.validated_key(request)?;

        self.medium.remove(key);
        if self.config.logging {
            debug!("Key '{}' deleted", key);
        }

        Some(CacheResponse::deleted(key))
    }

    // == Flush ==
    /// Removes every entry this cache recognizes as its own.
    ///
    /// Entries without an expiry marker, and plain values other writers
    /// stored, survive a flush untouched.
    ///
    /// # Returns
    /// Number of entries removed.
    pub fn flush(&mut self) -> usize {
        let removed = self.reclaimer().flush_owned();
        if self.config.logging {
            debug!("Flush removed {} entries", removed);
        }
        removed
    }

    // == Size ==
    /// Measures stored bytes.
    ///
    /// With a request naming a key, the size of that key's stored value
    /// (0 when absent). Without one, the total across every key in the
    /// medium, foreign values included.
    pub fn size(&self, request: Option<&CacheRequest>) -> u64 {
        match request {
            Some(request) if !request.key_name.is_empty() => self
                .medium
                .get(&request.key_name)
                .map_or(0, |raw| raw.len() as u64),
            _ => self
                .medium
                .keys()
                .iter()
                .filter_map(|key| self.medium.get(key))
                .map(|raw| raw.len() as u64)
                .sum(),
        }
    }

    // == Remaining Capacity ==
    /// Estimated bytes still writable before the medium fills.
    ///
    /// # Returns
    /// `None` when no capacity estimate exists for the medium.
    pub fn remaining_capacity(&self) -> Option<u64> {
        self.capacity
            .total_bytes()
            .map(|total| total.saturating_sub(self.size(None)))
    }

    // == Medium Access ==
    /// The backing medium, for inspection.
    pub fn medium(&self) -> &M {
        &self.medium
    }

    // == Admission ==
    /// Runs the admission pipeline for a validated save request.
    fn admit(&mut self, request: &CacheRequest) -> CacheResponse {
        let key = request.key_name.as_str();
        let now = Local::now().naive_local();

        // Resolve expiry before anything touches the medium
        let resolved = match resolve_expiry(
            self.config.expire_mode,
            request.period,
            request.expire_date.as_deref(),
            now,
        ) {
            Ok(resolved) => resolved,
            Err(err) => {
                if self.config.logging {
                    warn!("Key '{}' rejected: {}", key, err);
                }
                return CacheResponse::rejected(key, &err.to_string());
            }
        };

        let encoded = match CacheEntry::new(&request.value, resolved.period, resolved.expire_date.clone())
            .and_then(|entry| entry.encode())
        {
            Ok(encoded) => encoded,
            Err(err) => {
                if self.config.logging {
                    warn!("Key '{}' rejected: {}", key, err);
                }
                return CacheResponse::rejected(key, &err.to_string());
            }
        };

        if let Err(err) = self.try_write(key, &encoded, now) {
            if self.config.logging {
                warn!("Key '{}' not stored: {}", key, err);
            }
            return CacheResponse::rejected(key, &err.to_string());
        }

        if self.config.logging {
            debug!("Key '{}' stored, {} bytes", key, encoded.len());
        }

        CacheResponse::stored(
            key,
            json!({
                "value": request.value.clone(),
                "period": resolved.period,
                "expireDate": resolved.expire_date,
            }),
        )
    }

    // == Write With Retry ==
    /// Writes an encoded entry, reclaiming and retrying once on a full
    /// medium when eviction is enabled.
    fn try_write(&mut self, key: &str, encoded: &str, now: NaiveDateTime) -> Result<()> {
        let full = match self.medium.set(key, encoded) {
            Ok(()) => return Ok(()),
            Err(full) => full,
        };

        if !self.config.evict_on_full {
            return Err(full.into());
        }

        if self.config.logging {
            debug!("Medium full on key '{}', reclaiming expired entries", key);
        }

        let freed = self.reclaimer().reclaim(0, now);
        if freed < encoded.len() as u64 {
            if self.config.logging {
                warn!(
                    "Reclaimed {} bytes, short of the {} the entry needs",
                    freed,
                    encoded.len()
                );
            }
            return Err(full.into());
        }

        self.medium.set(key, encoded).map_err(CacheError::from)
    }

    // == Validation ==
    /// Validates a request, returning its key on success.
    ///
    /// Invalid requests are dropped here; no operation runs for them.
    fn validated_key<'r>(&self, request: &'r CacheRequest) -> Option<&'r str> {
        match request.validate() {
            None => Some(request.key_name.as_str()),
            Some(reason) => {
                if self.config.logging {
                    warn!("Request dropped: {}", CacheError::Validation(reason));
                }
                None
            }
        }
    }

    // == Staleness Purge ==
    /// Reclaims entries past the configured staleness threshold, if any.
    fn purge_if_configured(&mut self) {
        if let Some(threshold) = self.config.clean_dirty_after {
            let now = Local::now().naive_local();
            let freed = self.reclaimer().reclaim(threshold, now);
            if self.config.logging && freed > 0 {
                debug!("Staleness purge freed {} bytes", freed);
            }
        }
    }

    // == Reclaimer ==
    /// A reclamation pass borrowing this store's medium and policy.
    fn reclaimer(&mut self) -> Reclaimer<'_, M> {
        Reclaimer::new(
            &mut self.medium,
            self.config.on_bad_timestamp,
            self.config.logging,
        )
    }
}
