//! Pluggable key hashing.
//!
//! A table is handed a [`KeyHasher`] at construction and uses it for every
//! home-slot computation. Plain functions and closures of type
//! `Fn(&str) -> u64` work directly, and any [`BuildHasher`] can be adapted
//! through [`HashBuilder`].

use core::hash::BuildHasher;

/// Maps a key to an unsigned integer. The table reduces it modulo its
/// capacity to find the key's home slot.
pub trait KeyHasher {
    /// Hashes `key`.
    fn hash_key(&self, key: &str) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Adapts a [`BuildHasher`] into a [`KeyHasher`].
///
/// # Examples
///
/// ```rust
/// use siphasher::sip::SipHasher;
/// use tomb_hash::HashBuilder;
/// use tomb_hash::KeyHasher;
///
/// # #[derive(Clone, Default)]
/// # struct SipState;
/// # impl core::hash::BuildHasher for SipState {
/// #     type Hasher = SipHasher;
/// #
/// #     fn build_hasher(&self) -> Self::Hasher {
/// #         SipHasher::new()
/// #     }
/// # }
/// #
/// let hasher = HashBuilder(SipState);
/// assert_eq!(hasher.hash_key("key0"), hasher.hash_key("key0"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HashBuilder<S>(pub S);

impl<S: BuildHasher> KeyHasher for HashBuilder<S> {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self.0.hash_one(key)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        type DefaultState = foldhash::fast::FixedState;
    } else if #[cfg(feature = "std")] {
        type DefaultState =
            core::hash::BuildHasherDefault<std::collections::hash_map::DefaultHasher>;
    }
}

/// The general-purpose string hash used by
/// [`HashTable::new`](crate::HashTable::new).
///
/// Deterministic for a given build: the same key always lands in the same
/// home slot, which keeps diagnostic dumps reproducible. Backed by foldhash
/// when the `foldhash` feature is enabled, and by the standard library's
/// SipHash otherwise.
#[cfg(any(feature = "std", feature = "foldhash"))]
pub type DefaultKeyHasher = HashBuilder<DefaultState>;

#[cfg(test)]
mod tests {
    use core::hash::Hasher;

    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone, Default)]
    struct SipState;

    impl BuildHasher for SipState {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new()
        }
    }

    fn takes_hasher(hasher: &impl KeyHasher, key: &str) -> u64 {
        hasher.hash_key(key)
    }

    #[test]
    fn closures_are_key_hashers() {
        assert_eq!(takes_hasher(&|key: &str| key.len() as u64, "four"), 4);
        assert_eq!(takes_hasher(&|_: &str| 7u64, "anything"), 7);
    }

    #[test]
    fn fn_pointers_are_key_hashers() {
        fn first_byte(key: &str) -> u64 {
            key.bytes().next().map_or(0, u64::from)
        }

        assert_eq!(takes_hasher(&first_byte, "a"), 97);
        assert_eq!(takes_hasher(&first_byte, ""), 0);
    }

    #[test]
    fn hash_builder_matches_hash_one() {
        let hasher = HashBuilder(SipState);
        let mut direct = SipHasher::new();
        core::hash::Hash::hash("key2", &mut direct);
        assert_eq!(hasher.hash_key("key2"), direct.finish());
    }

    #[cfg(any(feature = "std", feature = "foldhash"))]
    #[test]
    fn default_hasher_is_deterministic() {
        let a = DefaultKeyHasher::default();
        let b = DefaultKeyHasher::default();
        assert_eq!(a.hash_key("key0"), b.hash_key("key0"));
        assert_ne!(a.hash_key("key0"), a.hash_key("key1"));
    }
}
