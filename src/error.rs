use alloc::string::String;

/// Errors reported by the tables in this crate.
///
/// Lookups through [`find`](crate::HashTable::find) and removals never fail;
/// only [`get`](crate::HashTable::get) reports a missing key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No element is associated with the requested key.
    #[error("there is no element associated with key `{key}`")]
    KeyNotFound {
        /// The key that was looked up.
        key: String,
    },

    /// The requested capacity bounds cannot describe a valid table.
    ///
    /// Raised when `capacity` is zero, when `min_capacity > capacity`, when
    /// `capacity > max_capacity`, or when `max_capacity < min_capacity`.
    #[error(
        "invalid capacity bounds: capacity {capacity} must be non-zero and lie within \
         [{min_capacity}, {max_capacity}]"
    )]
    CapacityViolation {
        /// Requested initial capacity.
        capacity: usize,
        /// Requested lower bound.
        min_capacity: usize,
        /// Requested upper bound.
        max_capacity: usize,
    },

    /// The slot array for `capacity` slots could not be allocated.
    ///
    /// The table, if one already existed, is left unchanged.
    #[error("failed to allocate a slot array of {capacity} slots")]
    AllocationFailed {
        /// The slot count that was requested.
        capacity: usize,
    },

    /// Every slot is occupied and the table cannot grow past its maximum
    /// capacity.
    #[error("table is saturated: all {capacity} slots are occupied at maximum capacity")]
    Saturated {
        /// The pinned capacity of the table.
        capacity: usize,
    },
}
