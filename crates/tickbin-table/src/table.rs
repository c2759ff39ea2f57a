//! Open-addressing slot table.

use tickbin_candle::CombinedCandle;
use tickbin_types::{ContractKey, KeyHasher, Result, TickbinError};
use tracing::{debug, trace, warn};

use crate::{Bucket, CollectionConfig, UsedIndex};

/// Outcome of probing for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The first free slot on the key's probe path.
    Empty(usize),
    /// The slot already claimed by the key.
    Occupied(usize),
}

/// Fixed-capacity table mapping contract keys to buckets.
///
/// Lookups start at `hash(key) % capacity` and scan forward with wraparound
/// until they hit the key's slot or a free one. Slots are only released all
/// together by [`SlotTable::rinse_active`], so probe paths never contain
/// holes during a period.
///
/// Bucket storage is allocated the first time a slot is claimed and kept
/// until the table is dropped. References handed out borrow the table, so
/// none can survive a rinse.
#[derive(Debug)]
pub struct SlotTable {
    slots: Vec<Option<Bucket>>,
    used: UsedIndex,
    hasher: KeyHasher,
    config: CollectionConfig,
}

impl SlotTable {
    /// Creates an empty table. No bucket storage is allocated yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config has zero capacity or bucket size.
    pub fn new(config: CollectionConfig) -> Result<Self> {
        config.validate()?;
        let mut slots = Vec::with_capacity(config.capacity);
        slots.resize_with(config.capacity, || None);
        Ok(Self {
            slots,
            used: UsedIndex::with_capacity(config.capacity),
            hasher: config.hasher(),
            config,
        })
    }

    /// Returns the bucket of `key`, claiming a free slot if needed.
    ///
    /// A newly claimed slot is appended to the used index; an existing one is
    /// returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`TickbinError::NullKey`] for the null key and
    /// [`TickbinError::TableFull`] if every slot belongs to another contract.
    pub fn find_or_create(&mut self, key: ContractKey) -> Result<&mut Bucket> {
        if key.is_null() {
            return Err(TickbinError::NullKey);
        }

        let (index, fresh) = match self.probe(&key) {
            Some(Probe::Occupied(index)) => (index, false),
            Some(Probe::Empty(index)) => (index, true),
            None => {
                warn!(%key, capacity = self.capacity(), "slot table full");
                return Err(TickbinError::TableFull {
                    capacity: self.capacity(),
                });
            }
        };

        let CollectionConfig {
            layout_mode,
            bucket_size,
            ..
        } = self.config;
        let bucket = self.slots[index].get_or_insert_with(|| {
            debug!(slot = index, ?layout_mode, bucket_size, "allocating bucket storage");
            Bucket::new(layout_mode, bucket_size)
        });

        if fresh {
            bucket.claim(key);
            self.used.push(index);
        }
        Ok(bucket)
    }

    /// Returns the bucket of `key` if it was claimed this period.
    #[must_use]
    pub fn find(&self, key: ContractKey) -> Option<&Bucket> {
        match self.probe(&key)? {
            Probe::Occupied(index) => self.slots[index].as_ref(),
            Probe::Empty(_) => None,
        }
    }

    /// Mutable variant of [`SlotTable::find`].
    #[must_use]
    pub fn find_mut(&mut self, key: ContractKey) -> Option<&mut Bucket> {
        match self.probe(&key)? {
            Probe::Occupied(index) => self.slots[index].as_mut(),
            Probe::Empty(_) => None,
        }
    }

    /// Releases every bucket claimed this period.
    ///
    /// Each touched bucket forgets its contract and its ticks; storage stays
    /// allocated for reuse.
    pub fn rinse_active(&mut self) {
        for index in self.used.iter() {
            if let Some(bucket) = self.slots[index].as_mut() {
                bucket.rinse();
            }
        }
        trace!(rinsed = self.used.len(), "rinsed active buckets");
        self.used.clear();
    }

    /// Empties every bucket claimed this period, keeping the claims.
    pub fn flush_active(&mut self) {
        for index in self.used.iter() {
            if let Some(bucket) = self.slots[index].as_mut() {
                bucket.flush();
            }
        }
    }

    /// Returns the number of buckets claimed this period.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.used.len()
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of slots that have ever had storage allocated.
    #[must_use]
    pub fn allocated_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns the table configuration.
    #[must_use]
    pub const fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Returns the slots claimed this period.
    #[must_use]
    pub const fn used(&self) -> &UsedIndex {
        &self.used
    }

    /// Iterates over claimed buckets in first-touched order.
    pub fn active(&self) -> impl Iterator<Item = (ContractKey, &Bucket)> + '_ {
        self.used
            .iter()
            .filter_map(|index| self.slots[index].as_ref())
            .map(|bucket| (bucket.key(), bucket))
    }

    /// Iterates over the candle of every claimed bucket in first-touched order.
    pub fn candles(&self) -> impl Iterator<Item = (ContractKey, CombinedCandle)> + '_ {
        self.active().map(|(key, bucket)| (key, bucket.aggregate()))
    }

    /// Walks the probe path of `key`.
    ///
    /// Returns `None` if all slots were scanned without finding the key or a
    /// free slot.
    fn probe(&self, key: &ContractKey) -> Option<Probe> {
        if key.is_null() {
            return None;
        }
        let capacity = self.capacity();
        let mut index = self.hasher.hash(key) as usize % capacity;
        for _ in 0..capacity {
            match &self.slots[index] {
                Some(bucket) if bucket.is_claimed() => {
                    if bucket.key() == *key {
                        return Some(Probe::Occupied(index));
                    }
                }
                _ => return Some(Probe::Empty(index)),
            }
            index += 1;
            if index == capacity {
                index = 0;
            }
        }
        None
    }
}
