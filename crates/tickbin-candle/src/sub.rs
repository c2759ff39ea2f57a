//! Per-category candle.

use serde::{Deserialize, Serialize};
use tickbin_types::{Decimal, Price, Quantity};

/// Open/high/low/close summary of one tick category.
///
/// All price fields are zero until the first tick arrives; check
/// [`SubCandle::is_empty`] before reading them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubCandle {
    /// First price of the period.
    pub open: Price,
    /// Highest price of the period.
    pub high: Price,
    /// Lowest price of the period.
    pub low: Price,
    /// Last price of the period.
    pub close: Price,
    /// Number of ticks folded in.
    pub ticks: u64,
    /// Accumulated quantity. Only trades feed this.
    pub volume: Quantity,
}

impl SubCandle {
    /// An empty candle.
    pub const EMPTY: Self = Self {
        open: Decimal::ZERO,
        high: Decimal::ZERO,
        low: Decimal::ZERO,
        close: Decimal::ZERO,
        ticks: 0,
        volume: Decimal::ZERO,
    };

    /// Folds one price into the candle.
    ///
    /// The first tick sets all four prices; later ticks widen the range and
    /// move the close. Equal prices keep whichever arrived first as open.
    pub fn improve(&mut self, price: Price) {
        if self.ticks == 0 {
            self.open = price;
            self.high = price;
            self.low = price;
        } else {
            self.high = self.high.max(price);
            self.low = self.low.min(price);
        }
        self.close = price;
        self.ticks += 1;
    }

    /// Folds one trade: price as in [`SubCandle::improve`], plus volume.
    pub fn improve_with_volume(&mut self, price: Price, quantity: Quantity) {
        self.improve(price);
        self.volume += quantity;
    }

    /// Returns true if no tick has been folded in.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ticks == 0
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> Price {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> Price {
        (self.close - self.open).abs()
    }

    /// Returns true if the period closed above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if the period closed below its open.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns the typical price ((high + low + close) / 3).
    #[must_use]
    pub fn typical_price(&self) -> Price {
        (self.high + self.low + self.close) / Decimal::from(3)
    }

    /// Returns the weighted close ((high + low + 2*close) / 4).
    #[must_use]
    pub fn weighted_close(&self) -> Price {
        (self.high + self.low + Decimal::TWO * self.close) / Decimal::from(4)
    }
}
