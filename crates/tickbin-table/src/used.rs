//! Active slot bookkeeping.

/// Slot indices claimed in the current period, in first-touched order.
///
/// Lets the table rinse and report only the slots it touched instead of
/// scanning all of them. Preallocated to the table capacity, so pushing never
/// reallocates.
#[derive(Debug, Clone, Default)]
pub struct UsedIndex {
    slots: Vec<usize>,
}

impl UsedIndex {
    /// Creates an empty index with room for `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Records a newly claimed slot.
    pub(crate) fn push(&mut self, slot: usize) {
        self.slots.push(slot);
    }

    /// Forgets all slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    /// Returns the number of active slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slot is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if `slot` is active.
    #[must_use]
    pub fn contains(&self, slot: usize) -> bool {
        self.slots.contains(&slot)
    }

    /// Iterates over active slots in first-touched order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    /// Returns active slots in first-touched order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.slots
    }
}
