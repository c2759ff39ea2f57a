//! Error types for tickbin.

use crate::{Category, ContractKey};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tickbin operations.
pub type Result<T> = std::result::Result<T, TickbinError>;

/// Errors returned by the bucket collection and its drivers.
///
/// `TableFull` and `BucketFull` are capacity outcomes: they go back to the
/// caller unchanged, and the caller picks the degradation policy.
#[derive(Error, Debug)]
pub enum TickbinError {
    /// Every slot is claimed by a different contract.
    #[error("Slot table full: all {capacity} slots claimed by other contracts")]
    TableFull {
        /// Number of slots in the table.
        capacity: usize,
    },

    /// The target tick array of a bucket is at its configured capacity.
    #[error("Bucket for {key} is full{}", full_suffix(.category))]
    BucketFull {
        /// Contract owning the bucket.
        key: ContractKey,
        /// The full category array, `None` for the shared flat array.
        category: Option<Category>,
    },

    /// A raw record carried an unknown category tag.
    #[error("Invalid tick category tag: {0}")]
    InvalidCategory(u8),

    /// The reserved all-zero key was offered as a live contract.
    #[error("The null contract key cannot be claimed")]
    NullKey,

    /// A sandwich must carry between one and three ticks.
    #[error("Invalid sandwich size {0}, expected 1 to 3 ticks")]
    SandwichSize(usize),

    /// A timestamp could not be aligned to its period.
    #[error("Timestamp error: {0}")]
    Timestamp(String),

    /// Invalid or unreadable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn full_suffix(category: &Option<Category>) -> String {
    category.map_or_else(String::new, |c| format!(" for {c} ticks"))
}

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Table capacity must be at least one slot.
    #[error("Capacity must be greater than zero")]
    ZeroCapacity,

    /// Buckets must hold at least one tick.
    #[error("Bucket size must be greater than zero")]
    ZeroBucketSize,

    /// Failed to read a configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse configuration JSON.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
