//! chain-hashmap: a byte-keyed map of `u32` values using separate
//! chaining, MurmurHash3 bucket indexing and load-factor growth.
//!
//! Internal Design:
//!
//! Summary
//! - Hashing: `murmur3::murmur3_32` computes a 32-bit digest from the key
//!   bytes and an explicit seed. The map reaches it through the
//!   `KeyHasher` trait; `Murmur3` carries the seed as a value.
//! - Indexing: `digest mod bucket_count`. The bucket count starts at the
//!   configured initial capacity (16 by default) and only ever doubles.
//! - Storage: entries live in a `SlotMap` arena. Each bucket stores the
//!   arena key of its chain head and each entry links to the next one, so
//!   a chain is a singly linked list of arena keys, not of pointers.
//!
//! Constraints
//! - Keys are arbitrary byte sequences; the map stores its own copy.
//! - Unique keys: inserting an existing key overwrites its value in place.
//! - Absent keys are `None`, never a reserved value.
//! - No removal; entries live as long as the map.
//!
//! Growth
//! - After a new key is linked, `len / bucket_count` is compared with the
//!   maximum load factor (0.75 by default). Above it, the bucket count
//!   doubles (repeatedly if needed) within the same `insert` call.
//! - Each entry caches its digest, so growth relinks entries by
//!   `digest mod new_count` without hashing keys again. Entry storage is
//!   never moved or reallocated by growth; `Handle`s stay valid.
//! - The new bucket array and the key copy are allocated before the map
//!   is modified. If either allocation fails, `insert` returns the error
//!   and the map is unchanged.
//!
//! Notes and non-goals
//! - Single-threaded: every operation runs to completion; mutation goes
//!   through `&mut self`.
//! - No shrinking, no ordering guarantees for `iter`, no persistence.

pub mod chain_hash_map;
mod chain_hash_map_proptest;
pub mod config;
mod error;
pub mod murmur3;

// Public surface
pub use chain_hash_map::{ChainHashMap, Handle, Iter};
pub use config::{MapConfig, DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR};
pub use error::MapError;
pub use murmur3::{murmur3_32, KeyHasher, Murmur3, DEFAULT_SEED};
