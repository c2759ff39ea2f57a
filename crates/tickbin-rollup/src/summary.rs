//! Per-period output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tickbin_candle::CombinedCandle;
use tickbin_types::{ContractKey, Timeframe};

/// Candles of every contract that traded or quoted in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    /// Start of the period.
    pub period_start: DateTime<Utc>,
    /// Period length.
    pub timeframe: Timeframe,
    /// False when the period was closed before its end, either because a tick
    /// did not fit or through `close_period`. The rest of the period follows
    /// in another summary with the same start.
    pub complete: bool,
    /// One candle per contract, in the order contracts first appeared.
    pub candles: Vec<(ContractKey, CombinedCandle)>,
}

impl PeriodSummary {
    /// Returns the candle of a contract.
    #[must_use]
    pub fn get(&self, key: ContractKey) -> Option<&CombinedCandle> {
        self.candles
            .iter()
            .find_map(|(k, candle)| (*k == key).then_some(candle))
    }

    /// Returns the number of contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Returns true if no contract was active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Returns the number of ticks across all contracts.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.candles
            .iter()
            .map(|(_, candle)| candle.tick_count())
            .sum()
    }
}
