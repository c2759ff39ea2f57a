//! Incremental candle aggregation for tickbin buckets.
//!
//! This crate provides the open/high/low/close rule applied to bucket contents:
//!
//! - [`SubCandle`] - OHLC plus tick count (and volume, for trades) of one category
//! - [`CombinedCandle`] - Bid, ask and trade sub-candles of one contract

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbin/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod combined;
mod sub;

pub use combined::CombinedCandle;
pub use sub::SubCandle;
