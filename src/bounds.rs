//! Capacity bounds and the grow/shrink rules shared by both table variants.

use crate::error::Error;

/// Slot count used by [`HashTable::new`](crate::HashTable::new).
pub const DEFAULT_CAPACITY: usize = 4;

/// Upper bound used when only an initial capacity is supplied.
pub const DEFAULT_MAX_CAPACITY: usize = 8192;

/// Inclusive limits on the number of slots a table may rescale to.
///
/// A table never grows past `max` and never shrinks below `min`, no matter
/// how many inserts or removals it sees.
///
/// # Examples
///
/// ```rust
/// use tomb_hash::Bounds;
///
/// let bounds = Bounds::new(4, 64);
/// assert!(bounds.validate(16).is_ok());
/// assert!(bounds.validate(2).is_err());
/// assert!(bounds.validate(128).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Smallest capacity a shrink may produce.
    pub min: usize,
    /// Largest capacity a grow may produce.
    pub max: usize,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_CAPACITY,
            max: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl Bounds {
    /// Creates bounds spanning `min..=max`.
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Bounds whose floor is the initial capacity itself.
    ///
    /// The ceiling is [`DEFAULT_MAX_CAPACITY`], or `capacity` when that is
    /// larger, so any non-zero capacity yields a valid table.
    pub const fn floored_at(capacity: usize) -> Self {
        let max = if capacity > DEFAULT_MAX_CAPACITY {
            capacity
        } else {
            DEFAULT_MAX_CAPACITY
        };
        Self { min: capacity, max }
    }

    /// Checks that a table of `capacity` slots can be built within these
    /// bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityViolation`] if `capacity` is zero or lies
    /// outside `min..=max`, or if `max < min`.
    pub fn validate(&self, capacity: usize) -> Result<(), Error> {
        if capacity == 0 || self.max < self.min || capacity < self.min || capacity > self.max {
            return Err(Error::CapacityViolation {
                capacity,
                min_capacity: self.min,
                max_capacity: self.max,
            });
        }
        Ok(())
    }

    /// Capacity after doubling, or `None` if that would pass `max`.
    pub(crate) fn grown(&self, capacity: usize) -> Option<usize> {
        capacity.checked_mul(2).filter(|&doubled| doubled <= self.max)
    }

    /// Capacity after halving, or `None` if that would fall below `min`.
    pub(crate) fn shrunk(&self, capacity: usize) -> Option<usize> {
        let halved = capacity / 2;
        (halved > 0 && halved >= self.min).then_some(halved)
    }

    /// `capacity * factor`, clamped into `min..=max`.
    pub(crate) fn scaled(&self, capacity: usize, factor: f64) -> usize {
        let target = capacity as f64 * factor;
        let scaled = if !(target >= self.min as f64) {
            // Also catches NaN factors.
            self.min
        } else if target >= self.max as f64 {
            self.max
        } else {
            target as usize
        };
        scaled.max(1)
    }
}

/// An insert grows the table when `count >= capacity * 0.5`.
#[inline(always)]
pub(crate) fn should_grow(count: usize, capacity: usize) -> bool {
    count.saturating_mul(2) >= capacity
}

/// A removal shrinks the table when `count <= capacity * 0.25`.
#[inline(always)]
pub(crate) fn should_shrink(count: usize, capacity: usize) -> bool {
    count.saturating_mul(4) <= capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_match_constants() {
        let bounds = Bounds::default();
        assert_eq!(bounds.min, DEFAULT_CAPACITY);
        assert_eq!(bounds.max, DEFAULT_MAX_CAPACITY);
        assert!(bounds.validate(DEFAULT_CAPACITY).is_ok());
    }

    #[test]
    fn validate_rejects_bad_configurations() {
        assert!(Bounds::new(4, 8).validate(0).is_err());
        assert!(Bounds::new(0, 8).validate(0).is_err());
        assert!(Bounds::new(4, 8).validate(3).is_err());
        assert!(Bounds::new(4, 8).validate(9).is_err());
        assert!(Bounds::new(8, 4).validate(6).is_err());
        assert_eq!(
            Bounds::new(4, 8).validate(2),
            Err(Error::CapacityViolation {
                capacity: 2,
                min_capacity: 4,
                max_capacity: 8,
            })
        );
    }

    #[test]
    fn floored_at_accepts_any_non_zero_capacity() {
        assert!(Bounds::floored_at(1).validate(1).is_ok());
        assert!(Bounds::floored_at(100_000).validate(100_000).is_ok());
        assert_eq!(Bounds::floored_at(16), Bounds::new(16, DEFAULT_MAX_CAPACITY));
        assert!(Bounds::floored_at(0).validate(0).is_err());
    }

    #[test]
    fn grow_and_shrink_respect_limits() {
        let bounds = Bounds::new(4, 16);
        assert_eq!(bounds.grown(4), Some(8));
        assert_eq!(bounds.grown(8), Some(16));
        assert_eq!(bounds.grown(16), None);
        assert_eq!(bounds.grown(usize::MAX), None);

        assert_eq!(bounds.shrunk(16), Some(8));
        assert_eq!(bounds.shrunk(8), Some(4));
        assert_eq!(bounds.shrunk(4), None);
        assert_eq!(bounds.shrunk(9), Some(4));
        assert_eq!(Bounds::new(0, 4).shrunk(1), None);
    }

    #[test]
    fn scaled_clamps() {
        let bounds = Bounds::new(4, 64);
        assert_eq!(bounds.scaled(8, 2.0), 16);
        assert_eq!(bounds.scaled(8, 0.5), 4);
        assert_eq!(bounds.scaled(8, 0.1), 4);
        assert_eq!(bounds.scaled(8, 100.0), 64);
        assert_eq!(bounds.scaled(8, f64::NAN), 4);
        assert_eq!(Bounds::new(0, 4).scaled(1, 0.0), 1);
    }

    #[test]
    fn thresholds() {
        assert!(!should_grow(1, 4));
        assert!(should_grow(2, 4));
        assert!(should_grow(3, 5));
        assert!(!should_grow(2, 5));

        assert!(should_shrink(0, 4));
        assert!(should_shrink(1, 4));
        assert!(!should_shrink(2, 4));
        assert!(should_shrink(4, 16));
        assert!(!should_shrink(5, 16));
    }
}
