//! Periodic candle rollup over a tickbin slot table.
//!
//! - [`PeriodRollup`] - Streaming driver that emits one summary per period
//! - [`PeriodSummary`] - Candles of every contract active in a period
//! - [`RollupConfig`] - Table settings, timeframe and overflow policy
//! - [`OverflowPolicy`] - Reaction to a full table or bucket

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbin/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod rollup;
mod summary;

pub use config::{OverflowPolicy, RollupConfig};
pub use rollup::{PeriodRollup, RollupStats};
pub use summary::PeriodSummary;
