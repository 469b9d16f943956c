//! A string-keyed hash table using separate chaining.
//!
//! Each slot owns a short list of entries whose keys share a home slot, so a
//! removal takes the entry out of its list directly and no tombstones are
//! needed. Capacity bounds and grow/shrink thresholds match
//! [`HashTable`](crate::HashTable).

use alloc::collections::TryReserveError;
use alloc::string::String;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::bounds::Bounds;
use crate::bounds::should_grow;
use crate::bounds::should_shrink;
use crate::error::Error;
#[cfg(any(feature = "std", feature = "foldhash"))]
use crate::hasher::DefaultKeyHasher;
use crate::hasher::KeyHasher;

type Bucket = Vec<(String, String)>;

/// One line of [`ChainedTable::dump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainEntry<'a> {
    /// The entry's key.
    pub key: &'a str,
    /// The entry's value.
    pub value: &'a str,
    /// The slot whose chain holds the entry, `hash(key) % capacity`.
    pub bucket: usize,
    /// Position of the entry within that chain.
    pub depth: usize,
}

/// A string-keyed hash table resolving collisions with per-slot chains.
///
/// Offers the same contract as [`HashTable`](crate::HashTable): inserting an
/// existing key is a no-op, [`get`](Self::get) is the only lookup that fails,
/// and removing an absent key does nothing. Chains never fill up, so inserts
/// cannot fail even at the maximum capacity.
///
/// # Examples
///
/// ```rust
/// use tomb_hash::ChainedTable;
///
/// let mut table = ChainedTable::new();
/// table.insert("key0", "value0");
/// assert_eq!(table.get("key0"), Ok("value0"));
/// assert_eq!(table.remove("key0"), Some("value0".to_string()));
/// assert!(table.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ChainedTable<H> {
    buckets: Vec<Bucket>,
    bounds: Bounds,
    count: usize,
    hasher: H,
}

fn allocate(len: usize) -> Result<Vec<Bucket>, TryReserveError> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(len)?;
    buckets.resize_with(len, Vec::new);
    Ok(buckets)
}

#[cfg(any(feature = "std", feature = "foldhash"))]
impl ChainedTable<DefaultKeyHasher> {
    /// Creates a table of [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) slots
    /// using the [`DefaultKeyHasher`].
    pub fn new() -> Self {
        Self {
            buckets: (0..crate::bounds::DEFAULT_CAPACITY)
                .map(|_| Vec::new())
                .collect(),
            bounds: Bounds::default(),
            count: 0,
            hasher: DefaultKeyHasher::default(),
        }
    }
}

#[cfg(any(feature = "std", feature = "foldhash"))]
impl Default for ChainedTable<DefaultKeyHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ChainedTable<H> {
    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the current number of slots.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the smallest capacity the table may shrink to.
    pub fn min_capacity(&self) -> usize {
        self.bounds.min
    }

    /// Returns the largest capacity the table may grow to.
    pub fn max_capacity(&self) -> usize {
        self.bounds.max
    }

    /// Returns the table's capacity bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the table's key hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns an iterator over all `(key, value)` pairs, slot by slot.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buckets
            .iter()
            .flatten()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Empties every chain, keeping the current capacity and bounds.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
        self.count = 0;
    }
}

impl<H: KeyHasher> ChainedTable<H> {
    /// Creates a table of `capacity` slots that never shrinks below
    /// `capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityViolation`] if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hasher: H) -> Result<Self, Error> {
        Self::with_bounds(capacity, Bounds::floored_at(capacity), hasher)
    }

    /// Creates a table of `capacity` slots that rescales within `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityViolation`] if `capacity` is zero, lies outside
    /// `bounds`, or if `bounds.max < bounds.min`. Returns
    /// [`Error::AllocationFailed`] if `capacity` slots cannot be allocated.
    pub fn with_bounds(capacity: usize, bounds: Bounds, hasher: H) -> Result<Self, Error> {
        bounds.validate(capacity)?;
        Ok(Self {
            buckets: allocate(capacity).map_err(|_| Error::AllocationFailed { capacity })?,
            bounds,
            count: 0,
            hasher,
        })
    }

    /// The slot whose chain holds `key`.
    #[inline]
    pub fn home_slot(&self, key: &str) -> usize {
        (self.hasher.hash_key(key) % self.buckets.len() as u64) as usize
    }

    /// Returns the stored key and value for `key`, or `None` if it is absent.
    pub fn find_entry(&self, key: &str) -> Option<(&str, &str)> {
        self.buckets[self.home_slot(key)]
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the value stored under `key`, or `None` if it is absent.
    pub fn find(&self, key: &str) -> Option<&str> {
        self.find_entry(key).map(|(_, value)| value)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_entry(key).is_some()
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] carrying `key` if it is absent.
    pub fn get(&self, key: &str) -> Result<&str, Error> {
        self.find(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Inserts `key` with `value` unless `key` is already present.
    ///
    /// Returns `true` if the entry was stored. May double the table first if
    /// it is at least half full.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        if should_grow(self.count, self.buckets.len()) {
            self.extend_table();
        }

        let key = key.into();
        let home = self.home_slot(&key);
        let bucket = &mut self.buckets[home];
        if bucket.iter().any(|(existing, _)| *existing == key) {
            return false;
        }
        bucket.push((key, value.into()));
        self.count += 1;
        true
    }

    /// Removes `key`, returning its value, or `None` if it was absent.
    ///
    /// May halve the table first if it is at most a quarter full.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        if should_shrink(self.count, self.buckets.len()) {
            self.shrink_table();
        }

        let home = self.home_slot(key);
        let bucket = &mut self.buckets[home];
        let position = bucket.iter().position(|(existing, _)| existing == key)?;
        let (_, value) = bucket.swap_remove(position);
        self.count -= 1;
        Some(value)
    }

    /// Inserts each pair in order. Returns how many were newly stored.
    pub fn insert_all<I, K, V>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut stored = 0;
        for (key, value) in pairs {
            if self.insert(key, value) {
                stored += 1;
            }
        }
        stored
    }

    /// Removes each key in order. Returns how many were present.
    pub fn remove_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        keys.into_iter()
            .filter(|key| self.remove(key.as_ref()).is_some())
            .count()
    }

    /// Rebuilds the table at `capacity * factor` slots, clamped into its
    /// bounds. Returns `false` if the new slots could not be allocated.
    pub fn resize_table(&mut self, factor: f64) -> bool {
        let target = self.bounds.scaled(self.buckets.len(), factor);
        self.rebuild(target)
    }

    /// Doubles the capacity unless that would pass the maximum.
    pub fn extend_table(&mut self) -> bool {
        match self.bounds.grown(self.buckets.len()) {
            Some(target) => self.rebuild(target),
            None => false,
        }
    }

    /// Halves the capacity unless that would fall below the minimum.
    pub fn shrink_table(&mut self) -> bool {
        match self.bounds.shrunk(self.buckets.len()) {
            Some(target) => self.rebuild(target),
            None => false,
        }
    }

    /// Replaces the key hasher and moves every entry to its new chain.
    ///
    /// Returns the previous hasher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the new chains cannot be
    /// allocated; the table keeps its entries and its current hasher.
    pub fn set_hasher(&mut self, hasher: H) -> Result<H, Error> {
        let capacity = self.buckets.len();
        let fresh = allocate(capacity).map_err(|_| Error::AllocationFailed { capacity })?;
        let previous = core::mem::replace(&mut self.hasher, hasher);
        self.refill(fresh);
        Ok(previous)
    }

    /// Lists every entry with its chain and position, slot by slot.
    ///
    /// For debugging and tests.
    pub fn dump(&self) -> Vec<ChainEntry<'_>> {
        self.buckets
            .iter()
            .enumerate()
            .flat_map(|(bucket, chain)| {
                chain
                    .iter()
                    .enumerate()
                    .map(move |(depth, (key, value))| ChainEntry {
                        key,
                        value,
                        bucket,
                        depth,
                    })
            })
            .collect()
    }

    fn rebuild(&mut self, new_capacity: usize) -> bool {
        let fresh = match allocate(new_capacity) {
            Ok(fresh) => fresh,
            Err(err) => {
                tracing::warn!(
                    capacity = self.buckets.len(),
                    new_capacity,
                    %err,
                    "failed to allocate chains, keeping current ones"
                );
                return false;
            }
        };

        let old_capacity = self.buckets.len();
        self.refill(fresh);
        tracing::debug!(
            old_capacity,
            new_capacity,
            count = self.count,
            "rebuilt chains"
        );
        true
    }

    fn refill(&mut self, fresh: Vec<Bucket>) {
        let old = core::mem::replace(&mut self.buckets, fresh);
        for (key, value) in old.into_iter().flatten() {
            let home = self.home_slot(&key);
            self.buckets[home].push((key, value));
        }
    }
}
