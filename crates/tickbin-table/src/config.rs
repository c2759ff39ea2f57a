//! Collection configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tickbin_types::{ConfigError, KeyHasher};

/// Physical storage layout of a bucket.
///
/// Both layouts expose the same operations; they differ in how
/// `bucket_size` is applied and in which array fills first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// One shared array of `bucket_size` ticks in arrival order.
    Flat,
    /// Separate bid, ask and trade arrays of `bucket_size` ticks each.
    #[default]
    PerCategory,
}

/// Construction-time settings of a [`SlotTable`](crate::SlotTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionConfig {
    /// Maximum number of distinct contracts per period.
    pub capacity: usize,
    /// Ticks per category (per-category layout) or in total (flat layout).
    pub bucket_size: usize,
    /// Bucket storage layout.
    pub layout_mode: LayoutMode,
    /// Seed of the key hasher.
    pub hash_seed: u32,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self::new(1024, 4096)
    }
}

impl CollectionConfig {
    /// Creates a config with the default layout and seed.
    #[must_use]
    pub const fn new(capacity: usize, bucket_size: usize) -> Self {
        Self {
            capacity,
            bucket_size,
            layout_mode: LayoutMode::PerCategory,
            hash_seed: KeyHasher::DEFAULT_SEED,
        }
    }

    /// Sets the bucket layout.
    #[must_use]
    pub const fn with_layout_mode(mut self, layout_mode: LayoutMode) -> Self {
        self.layout_mode = layout_mode;
        self
    }

    /// Sets the hash seed.
    #[must_use]
    pub const fn with_hash_seed(mut self, hash_seed: u32) -> Self {
        self.hash_seed = hash_seed;
        self
    }

    /// Returns the hasher for this config.
    #[must_use]
    pub const fn hasher(&self) -> KeyHasher {
        KeyHasher::new(self.hash_seed)
    }

    /// Returns how many ticks one bucket can hold across all categories.
    #[must_use]
    pub const fn ticks_per_bucket(&self) -> usize {
        match self.layout_mode {
            LayoutMode::Flat => self.bucket_size,
            LayoutMode::PerCategory => self.bucket_size * 3,
        }
    }

    /// Checks that the table and its buckets can hold anything at all.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero capacity or bucket size.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.bucket_size == 0 {
            return Err(ConfigError::ZeroBucketSize);
        }
        Ok(())
    }

    /// Parses and validates a JSON config. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the config is invalid.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the config
    /// is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }
}
