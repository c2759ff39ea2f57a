//! Bounded per-contract tick storage.

use chrono::{DateTime, Utc};
use tickbin_candle::CombinedCandle;
use tickbin_types::{
    Category, ContractKey, Price, Quantity, Result, Sandwich, TickRecord, TickbinError,
};

use crate::LayoutMode;

#[derive(Debug, Clone)]
enum Storage {
    Flat(Vec<TickRecord>),
    PerCategory([Vec<TickRecord>; 3]),
}

/// Fixed-capacity tick store owned by one contract at a time.
///
/// Storage is allocated once in [`Bucket::new`] and never grows: inserting
/// into a full array fails with [`TickbinError::BucketFull`]. Ticks are kept
/// in arrival order, which is also the order [`Bucket::aggregate`] folds them.
#[derive(Debug, Clone)]
pub struct Bucket {
    key: ContractKey,
    capacity: usize,
    storage: Storage,
}

impl Bucket {
    /// Creates an unclaimed bucket holding `capacity` ticks per array.
    #[must_use]
    pub fn new(layout: LayoutMode, capacity: usize) -> Self {
        let storage = match layout {
            LayoutMode::Flat => Storage::Flat(Vec::with_capacity(capacity)),
            LayoutMode::PerCategory => {
                Storage::PerCategory(std::array::from_fn(|_| Vec::with_capacity(capacity)))
            }
        };
        Self {
            key: ContractKey::NULL,
            capacity,
            storage,
        }
    }

    /// Returns the contract owning this bucket, or the null key.
    #[must_use]
    pub const fn key(&self) -> ContractKey {
        self.key
    }

    /// Returns true if a contract owns this bucket.
    #[must_use]
    pub const fn is_claimed(&self) -> bool {
        !self.key.is_null()
    }

    /// Returns the capacity of each array.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the storage layout.
    #[must_use]
    pub const fn layout(&self) -> LayoutMode {
        match self.storage {
            Storage::Flat(_) => LayoutMode::Flat,
            Storage::PerCategory(_) => LayoutMode::PerCategory,
        }
    }

    /// Returns the number of stored ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arrays().iter().map(Vec::len).sum()
    }

    /// Returns the number of stored ticks of one category.
    #[must_use]
    pub fn len_of(&self, category: Category) -> usize {
        match &self.storage {
            Storage::Flat(ticks) => ticks.iter().filter(|t| t.category == category).count(),
            Storage::PerCategory(arrays) => arrays[category.index()].len(),
        }
    }

    /// Returns true if no tick is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrays().iter().all(Vec::is_empty)
    }

    /// Returns true if any array has reached capacity.
    ///
    /// In the per-category layout a single full category is enough, even if
    /// the others still have room; use [`Bucket::is_full_for`] to ask about
    /// one category.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.arrays().iter().any(|ticks| ticks.len() >= self.capacity)
    }

    /// Returns true if a tick of `category` would not fit.
    #[must_use]
    pub fn is_full_for(&self, category: Category) -> bool {
        self.array(category).len() >= self.capacity
    }

    /// Appends one tick.
    ///
    /// # Errors
    ///
    /// Returns [`TickbinError::BucketFull`] if the target array is full.
    pub fn add_tick(
        &mut self,
        timestamp: DateTime<Utc>,
        category: Category,
        price: Price,
        quantity: Quantity,
    ) -> Result<()> {
        self.add_record(TickRecord::new(timestamp, category, price, quantity))
    }

    /// Appends one decoded record.
    ///
    /// # Errors
    ///
    /// Returns [`TickbinError::BucketFull`] if the target array is full.
    pub fn add_record(&mut self, record: TickRecord) -> Result<()> {
        if self.is_full_for(record.category) {
            return Err(self.full_error(record.category));
        }
        self.array_mut(record.category).push(record);
        Ok(())
    }

    /// Appends all legs of a sandwich, or none of them.
    ///
    /// Room for every leg is checked before anything is written, so a
    /// failed batch leaves the bucket unchanged. Legs keep their given order.
    ///
    /// # Errors
    ///
    /// Returns [`TickbinError::BucketFull`] if any leg would not fit.
    pub fn add_ticks_batch(&mut self, sandwich: &Sandwich) -> Result<()> {
        let records = sandwich.records();
        match &self.storage {
            Storage::Flat(ticks) => {
                if ticks.len() + records.len() > self.capacity {
                    return Err(self.full_error(records[0].category));
                }
            }
            Storage::PerCategory(arrays) => {
                let mut needed = [0usize; 3];
                for record in records {
                    needed[record.category.index()] += 1;
                }
                for category in Category::ALL {
                    let i = category.index();
                    if arrays[i].len() + needed[i] > self.capacity {
                        return Err(self.full_error(category));
                    }
                }
            }
        }

        for record in records {
            self.array_mut(record.category).push(*record);
        }
        Ok(())
    }

    /// Empties the bucket but keeps its contract.
    pub fn flush(&mut self) {
        for ticks in self.arrays_mut() {
            ticks.clear();
        }
    }

    /// Folds the stored ticks into a candle, in storage order.
    ///
    /// Stored ticks are left untouched, so this can be called at any fill
    /// level and any number of times.
    #[must_use]
    pub fn aggregate(&self) -> CombinedCandle {
        self.ticks().collect()
    }

    /// Iterates over stored ticks.
    ///
    /// The flat layout yields arrival order. The per-category layout yields
    /// bids, then asks, then trades, each in arrival order.
    pub fn ticks(&self) -> impl Iterator<Item = &TickRecord> + '_ {
        self.arrays().iter().flatten()
    }

    /// Iterates over stored ticks of one category, in arrival order.
    pub fn ticks_of(&self, category: Category) -> impl Iterator<Item = &TickRecord> + '_ {
        self.array(category)
            .iter()
            .filter(move |t| t.category == category)
    }

    pub(crate) fn claim(&mut self, key: ContractKey) {
        debug_assert!(!key.is_null());
        debug_assert!(self.is_empty());
        self.key = key;
    }

    pub(crate) fn rinse(&mut self) {
        self.key = ContractKey::NULL;
        self.flush();
    }

    fn full_error(&self, category: Category) -> TickbinError {
        TickbinError::BucketFull {
            key: self.key,
            category: match self.storage {
                Storage::Flat(_) => None,
                Storage::PerCategory(_) => Some(category),
            },
        }
    }

    fn arrays(&self) -> &[Vec<TickRecord>] {
        match &self.storage {
            Storage::Flat(ticks) => std::slice::from_ref(ticks),
            Storage::PerCategory(arrays) => arrays,
        }
    }

    fn arrays_mut(&mut self) -> &mut [Vec<TickRecord>] {
        match &mut self.storage {
            Storage::Flat(ticks) => std::slice::from_mut(ticks),
            Storage::PerCategory(arrays) => arrays,
        }
    }

    fn array(&self, category: Category) -> &Vec<TickRecord> {
        match &self.storage {
            Storage::Flat(ticks) => ticks,
            Storage::PerCategory(arrays) => &arrays[category.index()],
        }
    }

    fn array_mut(&mut self, category: Category) -> &mut Vec<TickRecord> {
        match &mut self.storage {
            Storage::Flat(ticks) => ticks,
            Storage::PerCategory(arrays) => &mut arrays[category.index()],
        }
    }
}
