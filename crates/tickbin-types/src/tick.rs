//! Tick data representation.

use chrono::{DateTime, Utc};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ContractKey, Result, TickbinError};

/// Fixed-point monetary value.
pub type Price = Decimal;

/// Fixed-point traded or quoted amount.
pub type Quantity = Decimal;

/// Kind of market event carried by a tick.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Best bid update.
    #[display("bid")]
    Bid,
    /// Best ask update.
    #[display("ask")]
    Ask,
    /// Executed trade.
    #[display("trade")]
    Trade,
}

impl Category {
    /// All categories in storage order.
    pub const ALL: [Self; 3] = [Self::Bid, Self::Ask, Self::Trade];

    /// Returns the wire tag used by the upstream tick store.
    #[must_use]
    pub const fn as_tag(self) -> u8 {
        self as u8
    }

    /// Returns a dense index in `0..3`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Category {
    type Error = TickbinError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Self::Bid),
            1 => Ok(Self::Ask),
            2 => Ok(Self::Trade),
            other => Err(TickbinError::InvalidCategory(other)),
        }
    }
}

/// A single decoded tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Event time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Bid, ask or trade.
    pub category: Category,
    /// Quoted or traded price.
    pub price: Price,
    /// Quoted size or traded volume.
    pub quantity: Quantity,
}

impl TickRecord {
    /// Creates a new tick record.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        category: Category,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            timestamp,
            category,
            price,
            quantity,
        }
    }
}

/// Tick as delivered by the upstream store, before the category is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTick {
    /// Contract the tick belongs to.
    pub key: ContractKey,
    /// Event time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Undecoded category tag.
    pub tag: u8,
    /// Quoted or traded price.
    pub price: Price,
    /// Quoted size or traded volume.
    pub quantity: Quantity,
}

impl RawTick {
    /// Creates a new raw tick.
    #[must_use]
    pub const fn new(
        key: ContractKey,
        timestamp: DateTime<Utc>,
        tag: u8,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            key,
            timestamp,
            tag,
            price,
            quantity,
        }
    }

    /// Decodes the category tag.
    ///
    /// # Errors
    ///
    /// Returns [`TickbinError::InvalidCategory`] for an unknown tag.
    pub fn decode(self) -> Result<(ContractKey, TickRecord)> {
        let category = Category::try_from(self.tag)?;
        Ok((
            self.key,
            TickRecord::new(self.timestamp, category, self.price, self.quantity),
        ))
    }
}

/// Two or three co-timed ticks reported as one upstream record.
///
/// A single-leg sandwich is accepted too, so every upstream record can be
/// routed through the same path. Legs keep the order they were given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sandwich {
    records: [TickRecord; Self::MAX_LEGS],
    len: usize,
}

impl Sandwich {
    /// Largest number of legs in one sandwich.
    pub const MAX_LEGS: usize = 3;

    /// Creates a sandwich from `(category, price, quantity)` legs sharing one timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TickbinError::SandwichSize`] unless there are 1 to 3 legs.
    pub fn new(
        timestamp: DateTime<Utc>,
        legs: &[(Category, Price, Quantity)],
    ) -> Result<Self> {
        if legs.is_empty() || legs.len() > Self::MAX_LEGS {
            return Err(TickbinError::SandwichSize(legs.len()));
        }
        let filler = TickRecord::new(timestamp, Category::Bid, Decimal::ZERO, Decimal::ZERO);
        let mut records = [filler; Self::MAX_LEGS];
        for (slot, &(category, price, quantity)) in records.iter_mut().zip(legs) {
            *slot = TickRecord::new(timestamp, category, price, quantity);
        }
        Ok(Self {
            records,
            len: legs.len(),
        })
    }

    /// Returns the shared timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.records[0].timestamp
    }

    /// Returns the legs as tick records, in the order given.
    #[must_use]
    pub fn records(&self) -> &[TickRecord] {
        &self.records[..self.len]
    }

    /// Returns the number of legs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always false: a sandwich holds at least one leg.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}
