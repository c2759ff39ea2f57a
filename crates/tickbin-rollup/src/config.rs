//! Rollup configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tickbin_table::CollectionConfig;
use tickbin_types::{ConfigError, Timeframe};

/// What the driver does when a tick does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Return the `TableFull` or `BucketFull` error to the caller.
    #[default]
    Reject,
    /// Discard the tick and count it.
    DropTick,
    /// Emit the period so far as an incomplete summary, rinse, and retry once.
    EarlyRollup,
}

/// Settings of a [`PeriodRollup`](crate::PeriodRollup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RollupConfig {
    /// Slot table settings.
    pub collection: CollectionConfig,
    /// Period length.
    pub timeframe: Timeframe,
    /// Overflow handling.
    pub overflow: OverflowPolicy,
}

impl RollupConfig {
    /// Creates a config with the default overflow policy.
    #[must_use]
    pub const fn new(collection: CollectionConfig, timeframe: Timeframe) -> Self {
        Self {
            collection,
            timeframe,
            overflow: OverflowPolicy::Reject,
        }
    }

    /// Sets the overflow policy.
    #[must_use]
    pub const fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the table settings are invalid.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.collection.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the table
    /// settings are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }
}
