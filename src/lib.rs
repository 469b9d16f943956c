#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bounds;

/// A hash table resolving collisions with per-slot chains.
///
/// This module provides a `ChainedTable` with the same contract as
/// `HashTable`, trading tombstones for a small list per slot.
pub mod chained_table;

mod error;

pub mod hash_table;

pub mod hasher;

/// Slot states of the open-addressing table.
pub mod slot;

pub use bounds::Bounds;
pub use bounds::DEFAULT_CAPACITY;
pub use bounds::DEFAULT_MAX_CAPACITY;
pub use chained_table::ChainedTable;
pub use error::Error;
pub use hash_table::DumpEntry;
pub use hash_table::HashTable;
#[cfg(any(feature = "std", feature = "foldhash"))]
pub use hasher::DefaultKeyHasher;
pub use hasher::HashBuilder;
pub use hasher::KeyHasher;
pub use slot::Slot;
