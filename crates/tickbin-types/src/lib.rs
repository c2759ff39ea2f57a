//! Core types for the tickbin tick-bucket collection.
//!
//! This crate provides the fundamental data structures used throughout tickbin:
//!
//! - [`ContractKey`] - Fixed-width contract identifier with a reserved null value
//! - [`KeyHasher`] - Seeded 32-bit mixing function over a [`ContractKey`]
//! - [`TickRecord`] - A single bid, ask or trade event
//! - [`RawTick`] - Record as delivered upstream, category tag not yet decoded
//! - [`Sandwich`] - Up to three co-timed ticks delivered together
//! - [`Timeframe`] - Rollup period length

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbin/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod hash;
mod key;
mod tick;
mod timeframe;

pub use error::{ConfigError, Result, TickbinError};
pub use hash::KeyHasher;
pub use key::ContractKey;
pub use rust_decimal::Decimal;
pub use tick::{Category, Price, Quantity, RawTick, Sandwich, TickRecord};
pub use timeframe::{Timeframe, TimeframeParseError};
