//! A string-keyed hash table using open addressing with linear probing.
//!
//! Collisions are resolved by scanning forward from a key's home slot
//! (`hash % capacity`), wrapping at the end of the slot array. Removal leaves a
//! [`Slot::Tombstone`] behind so that probe chains running through the removed
//! entry stay connected; the next insert along that chain reuses the first
//! tombstone it passes, and every resize drops them altogether.
//!
//! The table doubles before an insert once `len >= capacity / 2` and halves
//! before a removal once `len <= capacity / 4`, always staying within its
//! [`Bounds`].

use alloc::format;
use alloc::string::String;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::bounds::Bounds;
use crate::bounds::should_grow;
use crate::bounds::should_shrink;
use crate::error::Error;
#[cfg(any(feature = "std", feature = "foldhash"))]
use crate::hasher::DefaultKeyHasher;
use crate::hasher::KeyHasher;
use crate::slot::Slot;
use crate::slot::SlotArray;

/// One line of [`HashTable::dump`]: where a live entry hashes to and where it
/// actually sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpEntry<'a> {
    /// The entry's key.
    pub key: &'a str,
    /// The entry's value.
    pub value: &'a str,
    /// `hash(key) % capacity`.
    pub home: usize,
    /// The slot index holding the entry.
    pub actual: usize,
}

impl DumpEntry<'_> {
    /// Number of probe steps from the home slot to the actual slot in a table
    /// of `capacity` slots.
    ///
    /// `capacity` only matters when the probe wrapped past the last slot.
    pub fn displacement(&self, capacity: usize) -> usize {
        if self.actual >= self.home {
            self.actual - self.home
        } else {
            capacity.saturating_sub(self.home) + self.actual
        }
    }
}

/// Debug statistics for hash table analysis.
///
/// Available in tests and with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live entries
    pub populated: usize,
    /// Current slot count
    pub capacity: usize,
    /// Lower capacity bound
    pub min_capacity: usize,
    /// Upper capacity bound
    pub max_capacity: usize,
    /// Number of tombstoned slots
    pub tombstones: usize,
    /// Number of never-written slots
    pub empty_slots: usize,
    /// populated / capacity
    pub load_factor: f64,
    /// Longest distance from a home slot to the entry's slot
    pub longest_probe: usize,
    /// Mean distance from home slot to entry slot
    pub mean_probe: f64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Bounds: [{}, {}]",
            self.min_capacity, self.max_capacity
        );
        println!(
            "Slots: {} occupied, {} tombstones, {} empty",
            self.populated, self.tombstones, self.empty_slots
        );
        println!(
            "Probe length: longest {}, mean {:.02}",
            self.longest_probe, self.mean_probe
        );
    }
}

/// A string-keyed hash table using linear probing and tombstone deletion.
///
/// `HashTable<H>` maps `String` keys to `String` values and hashes keys with a
/// [`KeyHasher`] fixed at construction. Inserting a key that is already present
/// leaves the stored value untouched; to replace a value, remove the key first.
///
/// ## Example
///
/// ```rust
/// use tomb_hash::HashTable;
///
/// let mut table = HashTable::new();
/// table.insert("key0", "value0");
/// table.insert("key1", "value1");
///
/// assert_eq!(table.get("key0"), Ok("value0"));
/// assert_eq!(table.find("key2"), None);
///
/// // Existing values are never overwritten by insert.
/// assert!(!table.insert("key0", "other"));
/// assert_eq!(table.get("key0"), Ok("value0"));
///
/// assert_eq!(table.remove("key0"), Some("value0".to_string()));
/// assert!(table.get("key0").is_err());
/// ```
#[derive(Clone)]
pub struct HashTable<H> {
    slots: SlotArray,
    bounds: Bounds,
    count: usize,
    tombstones: usize,
    hasher: H,
}

impl<H> Debug for HashTable<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("count", &self.count)
            .field("capacity", &self.slots.len())
            .field("bounds", &self.bounds)
            .field("tombstones", &self.tombstones)
            .field(
                "slots",
                &self
                    .slots
                    .iter()
                    .map(|slot| match slot {
                        Slot::Empty => "..".to_string(),
                        Slot::Tombstone => "xx".to_string(),
                        Slot::Occupied { key, value } => format!("{key}={value}"),
                    })
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(any(feature = "std", feature = "foldhash"))]
impl HashTable<DefaultKeyHasher> {
    /// Creates a table of [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) slots
    /// using the [`DefaultKeyHasher`].
    ///
    /// The table may shrink back to its initial capacity but never below it,
    /// and may grow up to [`DEFAULT_MAX_CAPACITY`](crate::DEFAULT_MAX_CAPACITY).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let table = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), tomb_hash::DEFAULT_CAPACITY);
    /// ```
    pub fn new() -> Self {
        Self {
            slots: SlotArray::new(crate::bounds::DEFAULT_CAPACITY),
            bounds: Bounds::default(),
            count: 0,
            tombstones: 0,
            hasher: DefaultKeyHasher::default(),
        }
    }
}

#[cfg(any(feature = "std", feature = "foldhash"))]
impl Default for HashTable<DefaultKeyHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HashTable<H> {
    /// Allocates a table whose configuration has already been validated.
    fn build(capacity: usize, bounds: Bounds, hasher: H) -> Result<Self, Error> {
        debug_assert!(bounds.validate(capacity).is_ok());
        let slots =
            SlotArray::try_new(capacity).map_err(|_| Error::AllocationFailed { capacity })?;
        Ok(Self {
            slots,
            bounds,
            count: 0,
            tombstones: 0,
            hasher,
        })
    }

    /// Returns the number of live entries in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// assert_eq!(table.len(), 0);
    /// table.insert("a", "1");
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the current number of slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::Bounds;
    /// use tomb_hash::HashTable;
    ///
    /// let table = HashTable::with_bounds(16, Bounds::new(4, 64), |key: &str| key.len() as u64)?;
    /// assert_eq!(table.capacity(), 16);
    /// # Ok::<(), tomb_hash::Error>(())
    /// ```
    pub fn capacity(&self) -> usize {
        self.slots.len()
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

    /// Returns the number of tombstoned slots awaiting reuse or a resize.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.slots.len() as f64
    }

    /// Returns the table's key hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the raw slot states in slot order.
    pub fn slots(&self) -> core::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Returns an iterator over all `(key, value)` pairs in slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("a", "1");
    /// table.insert("b", "2");
    ///
    /// let mut pairs: Vec<_> = table.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [("a", "1"), ("b", "2")]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Removes every entry, yielding the owned `(key, value)` pairs.
    ///
    /// The table keeps its current capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("a", "1");
    ///
    /// let drained: Vec<_> = table.drain().collect();
    /// assert!(table.is_empty());
    /// assert_eq!(drained, [("a".to_string(), "1".to_string())]);
    /// ```
    pub fn drain(&mut self) -> Drain<'_> {
        self.count = 0;
        self.tombstones = 0;
        Drain {
            slots: self.slots.iter_mut(),
        }
    }

    /// Resets every slot to empty, keeping the current capacity and bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert_all([("a", "1"), ("b", "2")]);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert!(table.get("a").is_err());
    /// ```
    pub fn clear(&mut self) {
        self.slots.reset();
        self.count = 0;
        self.tombstones = 0;
    }
}

impl<H: KeyHasher> HashTable<H> {
    /// Creates a table of `capacity` slots that never shrinks below
    /// `capacity`, hashing keys with `hasher`.
    ///
    /// The ceiling is [`DEFAULT_MAX_CAPACITY`](crate::DEFAULT_MAX_CAPACITY),
    /// or `capacity` itself if that is larger.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityViolation`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// fn by_length(key: &str) -> u64 {
    ///     key.len() as u64
    /// }
    ///
    /// let table = HashTable::with_hasher(8, by_length)?;
    /// assert_eq!(table.capacity(), 8);
    /// assert_eq!(table.min_capacity(), 8);
    /// assert!(HashTable::with_hasher(0, by_length).is_err());
    /// # Ok::<(), tomb_hash::Error>(())
    /// ```
    pub fn with_hasher(capacity: usize, hasher: H) -> Result<Self, Error> {
        Self::with_bounds(capacity, Bounds::floored_at(capacity), hasher)
    }

    /// Creates a table of `capacity` slots that rescales within `bounds`,
    /// hashing keys with `hasher`.
    ///
    /// Pre-size the table here when bounded per-call latency matters: every
    /// grow rebuilds the whole slot array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityViolation`] if `capacity` is zero, lies outside
    /// `bounds`, or if `bounds.max < bounds.min`. Nothing is allocated in that
    /// case. Returns [`Error::AllocationFailed`] if `capacity` slots cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::Bounds;
    /// use tomb_hash::Error;
    /// use tomb_hash::HashTable;
    ///
    /// let hasher = |key: &str| key.bytes().map(u64::from).sum::<u64>();
    /// let table = HashTable::with_bounds(4, Bounds::new(4, 8192), hasher)?;
    /// assert_eq!(table.max_capacity(), 8192);
    ///
    /// let err = HashTable::with_bounds(2, Bounds::new(4, 8192), hasher).unwrap_err();
    /// assert!(matches!(err, Error::CapacityViolation { .. }));
    /// # Ok::<(), tomb_hash::Error>(())
    /// ```
    pub fn with_bounds(capacity: usize, bounds: Bounds, hasher: H) -> Result<Self, Error> {
        bounds.validate(capacity)?;
        Self::build(capacity, bounds, hasher)
    }

    /// The slot a key hashes to before any probing.
    #[inline]
    pub fn home_slot(&self, key: &str) -> usize {
        (self.hasher.hash_key(key) % self.slots.len() as u64) as usize
    }

    /// Probes from the key's home slot, skipping tombstones, until the key or
    /// an empty slot turns up. Visits each slot at most once.
    fn locate(&self, key: &str) -> Option<usize> {
        for index in self.slots.probe(self.home_slot(key)) {
            let slot = self.slots.get(index);
            if slot.is_empty() {
                return None;
            }
            if slot.holds(key) {
                return Some(index);
            }
        }
        None
    }

    /// Returns the value stored under `key`, or `None` if it is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("key0", "value0");
    ///
    /// assert_eq!(table.find("key0"), Some("value0"));
    /// assert_eq!(table.find("key1"), None);
    /// ```
    #[inline]
    pub fn find(&self, key: &str) -> Option<&str> {
        self.find_entry(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for `key`, or `None` if it is absent.
    #[inline]
    pub fn find_entry(&self, key: &str) -> Option<(&str, &str)> {
        let index = self.locate(key)?;
        self.slots.get(index).entry()
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] carrying `key` if it is absent. Prefer
    /// [`find`](Self::find) for plain existence checks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::Error;
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("key2", "value2");
    ///
    /// assert_eq!(table.get("key2"), Ok("value2"));
    /// assert_eq!(
    ///     table.get("nope"),
    ///     Err(Error::KeyNotFound {
    ///         key: "nope".to_string()
    ///     })
    /// );
    /// ```
    pub fn get(&self, key: &str) -> Result<&str, Error> {
        self.find(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Inserts `key` with `value` unless `key` is already present.
    ///
    /// Returns `true` if the entry was stored and `false` if the key already
    /// existed, in which case the stored value is left as it was. May double
    /// the table first if it is at least half full.
    ///
    /// # Panics
    ///
    /// Panics if every slot is occupied and the table is already at its
    /// maximum capacity. Use [`try_insert`](Self::try_insert) to handle that
    /// case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// assert!(table.insert("key0", "value0"));
    /// assert!(!table.insert("key0", "value11231"));
    /// assert_eq!(table.get("key0"), Ok("value0"));
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.try_insert(key, value) {
            Ok(inserted) => inserted,
            Err(err) => panic!("{err}"),
        }
    }

    /// Inserts `key` with `value` unless `key` is already present, reporting
    /// saturation instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Saturated`] if the key is absent, every slot is
    /// occupied, and the table cannot grow past its maximum capacity. The
    /// table is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::Bounds;
    /// use tomb_hash::Error;
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::with_bounds(2, Bounds::new(2, 2), |key: &str| key.len() as u64)?;
    /// assert_eq!(table.try_insert("a", "1"), Ok(true));
    /// assert_eq!(table.try_insert("b", "2"), Ok(true));
    /// assert_eq!(table.try_insert("a", "3"), Ok(false));
    /// assert_eq!(table.try_insert("c", "4"), Err(Error::Saturated { capacity: 2 }));
    /// # Ok::<(), tomb_hash::Error>(())
    /// ```
    pub fn try_insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<bool, Error> {
        if should_grow(self.count, self.slots.len()) && !self.extend_table() {
            tracing::debug!(
                count = self.count,
                capacity = self.slots.len(),
                "growth pinned at maximum capacity"
            );
        }

        let key = key.into();
        let mut first_tombstone = None;
        let mut first_empty = None;
        for index in self.slots.probe(self.home_slot(&key)) {
            match self.slots.get(index) {
                Slot::Empty => {
                    first_empty = Some(index);
                    break;
                }
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Occupied { key: existing, .. } => {
                    if *existing == key {
                        return Ok(false);
                    }
                }
            }
        }

        let index = match (first_tombstone, first_empty) {
            (Some(index), _) => {
                tracing::trace!(index, "reusing tombstone");
                self.tombstones -= 1;
                index
            }
            (None, Some(index)) => index,
            (None, None) => {
                tracing::warn!(capacity = self.slots.len(), "table saturated");
                return Err(Error::Saturated {
                    capacity: self.slots.len(),
                });
            }
        };

        self.slots.replace(
            index,
            Slot::Occupied {
                key,
                value: value.into(),
            },
        );
        self.count += 1;
        Ok(true)
    }

    /// Removes `key`, returning its value, or `None` if it was absent.
    ///
    /// The entry's slot becomes a tombstone. May halve the table first if it
    /// is at most a quarter full, even when `key` turns out to be absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("key0", "value0");
    ///
    /// assert_eq!(table.remove("key0"), Some("value0".to_string()));
    /// assert_eq!(table.remove("key0"), None);
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<String> {
        if should_shrink(self.count, self.slots.len()) {
            self.shrink_table();
        }

        let index = self.locate(key)?;
        match self.slots.replace(index, Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.count -= 1;
                self.tombstones += 1;
                Some(value)
            }
            _ => unreachable!("located slot holds no entry"),
        }
    }

    /// Inserts each pair in order, as if by [`insert`](Self::insert).
    ///
    /// Returns how many pairs were newly stored. Pairs inserted before a
    /// failure stay in the table.
    ///
    /// # Panics
    ///
    /// Panics under the same condition as [`insert`](Self::insert).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// let stored = table.insert_all([("a", "1"), ("b", "2"), ("a", "3")]);
    /// assert_eq!(stored, 2);
    /// assert_eq!(table.get("a"), Ok("1"));
    /// ```
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

    /// Removes each key in order, as if by [`remove`](Self::remove).
    ///
    /// Returns how many keys were present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert_all([("a", "1"), ("b", "2")]);
    /// assert_eq!(table.remove_all(["a", "b", "c"]), 2);
    /// assert!(table.is_empty());
    /// ```
    pub fn remove_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| self.remove(key.as_ref()))
            .filter(Option::is_some)
            .count()
    }

    /// Rebuilds the table at `capacity * factor` slots, clamped into its
    /// bounds.
    ///
    /// Live entries are re-placed under the new capacity and every tombstone is
    /// dropped. Returns `false`, leaving the table untouched, if the target
    /// capacity could not hold all live entries plus one empty slot or the new
    /// slot array could not be allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::Bounds;
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::with_bounds(8, Bounds::new(4, 64), |key: &str| key.len() as u64)?;
    /// table.insert("a", "1");
    ///
    /// assert!(table.resize_table(4.0));
    /// assert_eq!(table.capacity(), 32);
    /// assert!(table.resize_table(100.0));
    /// assert_eq!(table.capacity(), 64);
    /// assert_eq!(table.get("a"), Ok("1"));
    /// # Ok::<(), tomb_hash::Error>(())
    /// ```
    pub fn resize_table(&mut self, factor: f64) -> bool {
        let target = self.bounds.scaled(self.slots.len(), factor);
        target > self.count && self.rebuild(target)
    }

    /// Doubles the capacity unless that would pass the maximum.
    ///
    /// Returns `true` if the table was rebuilt.
    pub fn extend_table(&mut self) -> bool {
        match self.bounds.grown(self.slots.len()) {
            Some(target) => self.rebuild(target),
            None => false,
        }
    }

    /// Halves the capacity unless that would fall below the minimum or leave
    /// no room for the live entries.
    ///
    /// Returns `true` if the table was rebuilt.
    pub fn shrink_table(&mut self) -> bool {
        match self.bounds.shrunk(self.slots.len()) {
            Some(target) if target > self.count => self.rebuild(target),
            _ => false,
        }
    }

    /// Replaces the key hasher and re-places every live entry under it.
    ///
    /// Returns the previous hasher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the replacement slot array cannot
    /// be allocated. The table keeps its entries and its current hasher, and
    /// `hasher` is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// fn by_length(key: &str) -> u64 {
    ///     key.len() as u64
    /// }
    ///
    /// fn first_byte(key: &str) -> u64 {
    ///     key.bytes().next().map_or(0, u64::from)
    /// }
    ///
    /// let mut table = HashTable::<fn(&str) -> u64>::with_hasher(8, by_length)?;
    /// table.insert("apple", "red");
    /// table.set_hasher(first_byte)?;
    /// assert_eq!(table.get("apple"), Ok("red"));
    /// # Ok::<(), tomb_hash::Error>(())
    /// ```
    pub fn set_hasher(&mut self, hasher: H) -> Result<H, Error> {
        let capacity = self.slots.len();
        let fresh =
            SlotArray::try_new(capacity).map_err(|_| Error::AllocationFailed { capacity })?;
        let previous = core::mem::replace(&mut self.hasher, hasher);
        self.refill(fresh);
        Ok(previous)
    }

    /// Lists every live entry with its home slot and actual slot, in slot
    /// order.
    ///
    /// For debugging and tests.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomb_hash::HashTable;
    ///
    /// let mut table = HashTable::with_hasher(8, |_: &str| 3u64)?;
    /// table.insert("a", "1");
    /// table.insert("b", "2");
    ///
    /// let dump = table.dump();
    /// assert_eq!((dump[0].key, dump[0].home, dump[0].actual), ("a", 3, 3));
    /// assert_eq!((dump[1].key, dump[1].home, dump[1].actual), ("b", 3, 4));
    /// # Ok::<(), tomb_hash::Error>(())
    /// ```
    pub fn dump(&self) -> Vec<DumpEntry<'_>> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(actual, slot)| {
                let (key, value) = slot.entry()?;
                Some(DumpEntry {
                    key,
                    value,
                    home: self.home_slot(key),
                    actual,
                })
            })
            .collect()
    }

    /// Moves every live entry into a freshly allocated array of
    /// `new_capacity` slots. Leaves the table as it was if allocation fails.
    fn rebuild(&mut self, new_capacity: usize) -> bool {
        let fresh = match SlotArray::try_new(new_capacity) {
            Ok(fresh) => fresh,
            Err(err) => {
                tracing::warn!(
                    capacity = self.slots.len(),
                    new_capacity,
                    %err,
                    "failed to allocate slot array, keeping current one"
                );
                return false;
            }
        };

        let old_capacity = self.slots.len();
        self.refill(fresh);
        tracing::debug!(
            old_capacity,
            new_capacity,
            count = self.count,
            "rebuilt slot array"
        );
        true
    }

    /// Swaps in `fresh` and re-places every live entry of the old array under
    /// the current hasher. `fresh` must be empty and larger than `count`.
    fn refill(&mut self, fresh: SlotArray) {
        debug_assert!(fresh.len() > self.count || self.count == 0);
        let old = core::mem::replace(&mut self.slots, fresh);
        let expected = self.count;
        self.count = 0;
        self.tombstones = 0;

        for (key, value) in old.into_entries() {
            // Keys are already unique, so the first empty slot is the target.
            let home = self.home_slot(&key);
            let target = self
                .slots
                .probe(home)
                .find(|&index| self.slots.get(index).is_empty());
            if let Some(index) = target {
                self.slots.replace(index, Slot::Occupied { key, value });
                self.count += 1;
            }
        }

        debug_assert_eq!(self.count, expected);
    }

    /// Returns detailed utilization statistics for debugging.
    ///
    /// Available in tests and with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let capacity = self.slots.len();
        let displacements = self
            .dump()
            .iter()
            .map(|entry| entry.displacement(capacity))
            .collect::<Vec<_>>();
        let total: usize = displacements.iter().sum();

        DebugStats {
            populated: self.count,
            capacity,
            min_capacity: self.bounds.min,
            max_capacity: self.bounds.max,
            tombstones: self.tombstones,
            empty_slots: capacity - self.count - self.tombstones,
            load_factor: self.load_factor(),
            longest_probe: displacements.iter().copied().max().unwrap_or(0),
            mean_probe: if displacements.is_empty() {
                0.0
            } else {
                total as f64 / displacements.len() as f64
            },
        }
    }

    /// Computes a histogram of probe lengths for the current table state.
    ///
    /// Available in tests and with the `stats` feature. Index `i` counts the
    /// live entries sitting `i` slots past their home slot.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let capacity = self.slots.len();
        let mut hist = alloc::vec![0usize; capacity];
        for entry in self.dump() {
            hist[entry.displacement(capacity)] += 1;
        }
        let used = hist.iter().rposition(|&n| n != 0).map_or(0, |last| last + 1);
        hist.truncate(used);
        hist
    }

    /// Pretty-prints the probe-length histogram horizontally using stdout.
    ///
    /// Requires the `std` feature. Each row is one probe length.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_probe_histogram(&self) {
        let hist = self.probe_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.count);

        let make_bar = |count: usize| -> String {
            if count == 0 {
                return String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            if let Some(ch) = partial {
                bar.push(ch);
            }
            bar
        };

        for (distance, &count) in hist.iter().enumerate() {
            println!("{distance:>4} | {:<60} {count}", make_bar(count));
        }
    }
}

impl<H, K, V> Extend<(K, V)> for HashTable<H>
where
    H: KeyHasher,
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, H> IntoIterator for &'a HashTable<H> {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a [`HashTable`].
///
/// Created by [`HashTable::iter`]. Yields `(key, value)` pairs in slot order.
pub struct Iter<'a> {
    slots: core::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(Slot::entry)
    }
}

/// A draining iterator over the entries of a [`HashTable`].
///
/// Created by [`HashTable::drain`]. Slots are emptied in place as the
/// iterator advances; dropping it early discards the remaining entries and
/// keeps the table's capacity.
pub struct Drain<'a> {
    slots: core::slice::IterMut<'a, Slot>,
}

impl Iterator for Drain<'_> {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .find_map(|slot| match core::mem::take(slot) {
                Slot::Occupied { key, value } => Some((key, value)),
                _ => None,
            })
    }
}

impl Drop for Drain<'_> {
    fn drop(&mut self) {
        for slot in self.slots.by_ref() {
            *slot = Slot::Empty;
        }
    }
}
