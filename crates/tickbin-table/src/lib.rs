//! Fixed-capacity tick-bucket collection.
//!
//! - [`SlotTable`] - Open-addressing table resolving contract keys to buckets
//! - [`Bucket`] - Bounded per-contract tick store
//! - [`UsedIndex`] - Slots touched in the current period
//! - [`CollectionConfig`] - Capacity, bucket size, layout and hash seed

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbin/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bucket;
mod config;
mod table;
mod used;

pub use bucket::Bucket;
pub use config::{CollectionConfig, LayoutMode};
pub use table::SlotTable;
pub use used::UsedIndex;
