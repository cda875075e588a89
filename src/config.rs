//! Configuration Module
//!
//! Handles parsing and validating cache configuration from caller-supplied
//! options. Options are resolved once at construction and never change for
//! the lifetime of a store.

use serde::Deserialize;

use crate::error::{CacheError, Result};

// == Data Type ==
/// Interpretation applied to stored payloads when they are read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    /// Decode payloads as JSON envelopes (default)
    #[default]
    Json,
    /// Return payloads as raw text without decoding
    Text,
}

// == Expire Mode ==
/// How expiry information in a request is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpireMode {
    /// `period` is a duration in milliseconds from now (default)
    #[default]
    Interval,
    /// `expireDate` is an absolute `YYYY/MM/DD HH:MM:SS` timestamp
    AbsoluteTimestamp,
}

impl ExpireMode {
    /// Maps the numeric `expire` option to a mode.
    ///
    /// # Arguments
    /// * `code` - 1 for interval, 2 for absolute timestamp
    ///
    /// # Returns
    /// The matching mode, or a config error for any other value.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(ExpireMode::Interval),
            2 => Ok(ExpireMode::AbsoluteTimestamp),
            other => Err(CacheError::Config(format!(
                "expire must be 1 (interval) or 2 (absolute timestamp), got {other}"
            ))),
        }
    }
}

// == Bad Timestamp Policy ==
/// What reclamation does when it meets a recognized entry whose
/// `expireDate` no longer parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadTimestampPolicy {
    /// Log the entry and keep scanning (default)
    #[default]
    Skip,
    /// Stop the scan at the first bad timestamp
    Abort,
}

// == Cache Config ==
/// Resolved cache configuration.
///
/// Built from [`CacheOptions`] via [`CacheConfig::from_options`] or assembled
/// directly in code. Immutable once a store is constructed.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How stored payloads are interpreted on read
    pub data_type: DataType,
    /// How expiry information in requests is interpreted
    pub expire_mode: ExpireMode,
    /// Staleness threshold in milliseconds for the construction-time purge,
    /// or `None` to skip the purge entirely
    pub clean_dirty_after: Option<u64>,
    /// Whether a full medium triggers reclamation and a single retry
    pub evict_on_full: bool,
    /// Whether store operations emit log events
    pub logging: bool,
    /// Handling of unparseable timestamps during reclamation
    pub on_bad_timestamp: BadTimestampPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            data_type: DataType::Json,
            expire_mode: ExpireMode::Interval,
            clean_dirty_after: None,
            evict_on_full: true,
            logging: false,
            on_bad_timestamp: BadTimestampPolicy::Skip,
        }
    }
}

impl CacheConfig {
    /// Resolves caller-supplied options into a validated configuration.
    ///
    /// Fails fast: any unrecognized option value is rejected here rather
    /// than silently falling back to a default.
    ///
    /// # Arguments
    /// * `options` - Raw options, typically deserialized from JSON
    ///
    /// # Returns
    /// The resolved configuration, or a config error naming the bad option.
    pub fn from_options(options: CacheOptions) -> Result<Self> {
        let data_type = match options.data_type.as_deref() {
            None | Some("JSON") => DataType::Json,
            Some("String") => DataType::Text,
            Some(other) => {
                return Err(CacheError::Config(format!(
                    "dataType must be \"JSON\" or \"String\", got \"{other}\""
                )))
            }
        };

        let expire_mode = match options.expire {
            None => ExpireMode::Interval,
            Some(code) => ExpireMode::from_code(code)?,
        };

        let clean_dirty_after = match options.is_clean_dirty_storage {
            None | Some(CleanDirty::Disabled(false)) => None,
            Some(CleanDirty::AfterMs(ms)) => Some(ms),
            Some(CleanDirty::Disabled(true)) => {
                return Err(CacheError::Config(
                    "isCleanDirtyStorage must be false or a staleness threshold in milliseconds"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            data_type,
            expire_mode,
            clean_dirty_after,
            evict_on_full: options.is_clean_data_when_full.unwrap_or(true),
            logging: options.turn_on_logger.unwrap_or(false),
            on_bad_timestamp: BadTimestampPolicy::Skip,
        })
    }
}

// == Cache Options ==
/// Raw construction options as callers supply them.
///
/// Every field is optional; absent fields take the documented defaults.
/// Unknown fields are ignored so option objects can carry extra keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheOptions {
    /// "JSON" (default) or "String"
    pub data_type: Option<String>,
    /// 1 for interval expiry (default), 2 for absolute timestamps
    pub expire: Option<u8>,
    /// false to skip the construction purge, or a staleness threshold in ms
    pub is_clean_dirty_storage: Option<CleanDirty>,
    /// Whether a full medium triggers reclamation and one retry (default true)
    pub is_clean_data_when_full: Option<bool>,
    /// Whether store operations emit log events (default false)
    pub turn_on_logger: Option<bool>,
}

/// `isCleanDirtyStorage` accepts either `false` or a millisecond threshold.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum CleanDirty {
    /// Boolean form; only `false` is meaningful
    Disabled(bool),
    /// Numeric form: purge entries expired for longer than this many ms
    AfterMs(u64),
}
