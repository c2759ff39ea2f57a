//! Bid/ask/trade candle of one contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tickbin_types::{Category, TickRecord};

use crate::SubCandle;

/// The three sub-candles of one contract over one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombinedCandle {
    /// Bid quotes.
    pub bid: SubCandle,
    /// Ask quotes.
    pub ask: SubCandle,
    /// Trades, with volume.
    pub trade: SubCandle,
    /// Earliest timestamp folded in.
    pub first_at: Option<DateTime<Utc>>,
    /// Latest timestamp folded in.
    pub last_at: Option<DateTime<Utc>>,
}

impl CombinedCandle {
    /// Creates an empty candle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bid: SubCandle::EMPTY,
            ask: SubCandle::EMPTY,
            trade: SubCandle::EMPTY,
            first_at: None,
            last_at: None,
        }
    }

    /// Folds a run of records in the order given.
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TickRecord>) -> Self {
        let mut candle = Self::new();
        for record in records {
            candle.improve(record);
        }
        candle
    }

    /// Folds one record into its category's sub-candle.
    ///
    /// Quotes ignore quantity; trades add it to volume.
    pub fn improve(&mut self, record: &TickRecord) {
        match record.category {
            Category::Bid => self.bid.improve(record.price),
            Category::Ask => self.ask.improve(record.price),
            Category::Trade => self.trade.improve_with_volume(record.price, record.quantity),
        }

        let ts = record.timestamp;
        self.first_at = Some(self.first_at.map_or(ts, |first| first.min(ts)));
        self.last_at = Some(self.last_at.map_or(ts, |last| last.max(ts)));
    }

    /// Returns the sub-candle of a category.
    #[must_use]
    pub const fn get(&self, category: Category) -> &SubCandle {
        match category {
            Category::Bid => &self.bid,
            Category::Ask => &self.ask,
            Category::Trade => &self.trade,
        }
    }

    /// Returns the total number of ticks across categories.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.bid.ticks + self.ask.ticks + self.trade.ticks
    }

    /// Returns true if no tick has been folded in.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tick_count() == 0
    }
}

impl<'a> FromIterator<&'a TickRecord> for CombinedCandle {
    fn from_iter<I: IntoIterator<Item = &'a TickRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
