//! Allocation-free per-contract tick buckets with candle rollups.
//!
//! This is a facade crate that re-exports functionality from the tickbin
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use tickbin_lib::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let config = RollupConfig::new(CollectionConfig::new(256, 1024), Timeframe::Minute1);
//! let mut rollup = PeriodRollup::new(config)?;
//! let key = ContractKey::from_symbol("ESZ4").unwrap();
//!
//! let open = Utc.with_ymd_and_hms(2024, 12, 2, 14, 30, 0).unwrap();
//! for (offset, price) in [(0, 6050), (20, 6047), (40, 6052)] {
//!     let ts = open + chrono::TimeDelta::seconds(offset);
//!     let tick = TickRecord::new(ts, Category::Trade, Decimal::from(price), Decimal::ONE);
//!     rollup.process(key, &tick)?;
//! }
//!
//! let summary = rollup.finish().unwrap();
//! let candle = summary.get(key).unwrap();
//! assert_eq!(candle.trade.high, Decimal::from(6052));
//! assert_eq!(candle.trade.volume, Decimal::from(3));
//! # Ok::<(), TickbinError>(())
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbin/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickbin_types::*;

// Re-export candles
#[cfg(feature = "candle")]
pub use tickbin_candle::{CombinedCandle, SubCandle};

// Re-export the collection
#[cfg(feature = "table")]
pub use tickbin_table::{Bucket, CollectionConfig, LayoutMode, SlotTable, UsedIndex};

// Re-export the rollup driver
#[cfg(feature = "rollup")]
pub use tickbin_rollup::{OverflowPolicy, PeriodRollup, PeriodSummary, RollupConfig, RollupStats};

/// Prelude module for convenient imports.
///
/// ```
/// use tickbin_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbin_types::{
        Category, ContractKey, Decimal, KeyHasher, Price, Quantity, RawTick, Result, Sandwich,
        TickRecord, TickbinError, Timeframe,
    };

    #[cfg(feature = "candle")]
    pub use tickbin_candle::{CombinedCandle, SubCandle};

    #[cfg(feature = "table")]
    pub use tickbin_table::{Bucket, CollectionConfig, LayoutMode, SlotTable};

    #[cfg(feature = "rollup")]
    pub use tickbin_rollup::{OverflowPolicy, PeriodRollup, PeriodSummary, RollupConfig};
}
