//! Slot storage for the open-addressing table.

use alloc::boxed::Box;
use alloc::collections::TryReserveError;
use alloc::string::String;
use alloc::vec::Vec;

/// The state of a single slot in a [`HashTable`](crate::HashTable).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Slot {
    /// Never written since the slot array was allocated or cleared.
    #[default]
    Empty,
    /// Holds a live entry.
    Occupied {
        /// The entry's key.
        key: String,
        /// The entry's value.
        value: String,
    },
    /// Held an entry that has since been removed. Probes continue past it.
    Tombstone,
}

impl Slot {
    /// Returns `true` for [`Slot::Empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Returns `true` for [`Slot::Tombstone`].
    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    /// Returns the key and value of an occupied slot.
    #[inline]
    pub fn entry(&self) -> Option<(&str, &str)> {
        match self {
            Slot::Occupied { key, value } => Some((key.as_str(), value.as_str())),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn holds(&self, needle: &str) -> bool {
        matches!(self, Slot::Occupied { key, .. } if key == needle)
    }
}

/// A fixed-length array of slots. Its length is the table's capacity and
/// never changes; resizing builds a new array.
#[derive(Clone)]
pub(crate) struct SlotArray {
    slots: Box<[Slot]>,
}

impl SlotArray {
    /// Allocates `len` empty slots, reporting allocation failure instead of
    /// aborting.
    pub(crate) fn try_new(len: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(len)?;
        slots.resize_with(len, Slot::default);
        Ok(Self {
            slots: slots.into_boxed_slice(),
        })
    }

    /// Allocates `len` empty slots. Only used for the fixed default capacity.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: alloc::vec![Slot::Empty; len].into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub(crate) fn get(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    /// Stores `slot` at `index`, returning what was there.
    #[inline(always)]
    pub(crate) fn replace(&mut self, index: usize, slot: Slot) -> Slot {
        core::mem::replace(&mut self.slots[index], slot)
    }

    /// Resets every slot to [`Slot::Empty`] in place.
    pub(crate) fn reset(&mut self) {
        self.slots.fill(Slot::Empty);
    }

    pub(crate) fn iter(&self) -> core::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> core::slice::IterMut<'_, Slot> {
        self.slots.iter_mut()
    }

    pub(crate) fn into_vec(self) -> Vec<Slot> {
        self.slots.into_vec()
    }

    /// Consumes the array, yielding the key and value of each occupied slot.
    pub(crate) fn into_entries(self) -> impl Iterator<Item = (String, String)> {
        self.into_vec()
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Occupied { key, value } => Some((key, value)),
                _ => None,
            })
    }

    /// The linear probe sequence starting at `home`: every index exactly once,
    /// wrapping from the last slot back to the first.
    #[inline]
    pub(crate) fn probe(&self, home: usize) -> Probe {
        Probe {
            index: home,
            remaining: self.len(),
            len: self.len(),
        }
    }
}

/// Iterator over slot indices in linear probe order.
pub(crate) struct Probe {
    index: usize,
    remaining: usize,
    len: usize,
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.index;
        self.index += 1;
        if self.index == self.len {
            self.index = 0;
        }
        self.remaining -= 1;
        Some(current)
    }
}
