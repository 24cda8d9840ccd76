//! Error types for `chain-hashmap`.

use std::collections::TryReserveError;

/// Errors surfaced by map construction and insertion.
///
/// A missing key is not an error: lookups return `Option`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MapError {
    /// The bucket array could not be allocated, either when building the
    /// map or when growing it.
    #[error("failed to allocate {buckets} buckets")]
    Allocation {
        buckets: usize,
        #[source]
        source: TryReserveError,
    },

    /// The owned copy of a new key could not be allocated.
    #[error("failed to allocate a {len}-byte key")]
    KeyAllocation {
        len: usize,
        #[source]
        source: TryReserveError,
    },

    /// Doubling the bucket count would overflow `usize`.
    #[error("bucket count overflow while growing")]
    CapacityOverflow,

    /// A map needs at least one bucket.
    #[error("initial capacity must be greater than zero")]
    ZeroCapacity,

    /// The maximum load factor must be finite and positive.
    #[error("invalid maximum load factor {0}")]
    InvalidLoadFactor(f64),
}
