//! MurmurHash3, 32-bit x86 variant, and the `KeyHasher` seam used by the map.

/// Seed used by `Murmur3::default()`.
pub const DEFAULT_SEED: u32 = 0x9747_b28c;

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Computes the 32-bit MurmurHash3 digest of `key` under `seed`.
///
/// Full 4-byte chunks are read little-endian. The 0-3 trailing bytes are
/// packed little-endian into one word and folded in with the same mix; an
/// empty tail mixes a zero word, which leaves the digest unchanged. The
/// result matches the reference `MurmurHash3_x86_32`.
pub fn murmur3_32(key: &[u8], seed: u32) -> u32 {
    let mut h = seed;

    let mut chunks = key.chunks_exact(4);
    for chunk in &mut chunks {
        let k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        h ^= mix(k);
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let mut tail = [0u8; 4];
    let rest = chunks.remainder();
    tail[..rest.len()].copy_from_slice(rest);
    h ^= mix(u32::from_le_bytes(tail));

    // Only the low 32 bits of the length participate.
    h ^= key.len() as u32;
    fmix32(h)
}

#[inline]
fn mix(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Maps a digest onto one of `bucket_count` buckets.
///
/// `bucket_count` must be non-zero; the map never holds an empty bucket array.
#[inline]
pub fn bucket_index(digest: u32, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0);
    digest as usize % bucket_count
}

/// Produces the 32-bit digest a `ChainHashMap` indexes keys by.
///
/// Implementations must be deterministic: the map caches each entry's
/// digest and relies on equal keys producing equal digests.
pub trait KeyHasher {
    fn hash_key(&self, key: &[u8]) -> u32;
}

/// MurmurHash3 with an explicit seed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Murmur3 {
    seed: u32,
}

impl Murmur3 {
    pub const fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    pub const fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for Murmur3 {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl KeyHasher for Murmur3 {
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u32 {
        murmur3_32(key, self.seed)
    }
}

impl<H: KeyHasher + ?Sized> KeyHasher for &H {
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u32 {
        (**self).hash_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: identical `(key, seed)` pairs always produce identical digests.
    #[test]
    fn deterministic_for_identical_inputs() {
        for key in [&b""[..], b"a", b"ab", b"abc", b"abcd", b"apple", b"key19"] {
            assert_eq!(murmur3_32(key, 7), murmur3_32(key, 7));
        }
    }

    /// Invariant: the empty key hashes through the regular path; with seed 0
    /// every step is a no-op and the digest is 0.
    #[test]
    fn empty_key_is_stable() {
        assert_eq!(murmur3_32(b"", 0), 0);
        assert_eq!(murmur3_32(b"", DEFAULT_SEED), murmur3_32(&[], DEFAULT_SEED));
    }

    /// Invariant: every tail length (0..=3) contributes to the digest, so
    /// extending a key by one byte changes it.
    #[test]
    fn tail_bytes_are_mixed() {
        let key = b"abcdefg";
        let digests: Vec<u32> = (0..=key.len())
            .map(|n| murmur3_32(&key[..n], DEFAULT_SEED))
            .collect();
        for (i, a) in digests.iter().enumerate() {
            for b in &digests[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    /// Invariant: the seed participates in the digest.
    #[test]
    fn seed_changes_digest() {
        assert_ne!(murmur3_32(b"apple", 0), murmur3_32(b"apple", 1));
    }

    #[test]
    fn hasher_uses_its_seed() {
        let h = Murmur3::with_seed(42);
        assert_eq!(h.seed(), 42);
        assert_eq!(h.hash_key(b"banana"), murmur3_32(b"banana", 42));
        assert_eq!(Murmur3::default().seed(), DEFAULT_SEED);
    }

    #[test]
    fn bucket_index_is_modulo() {
        assert_eq!(bucket_index(35, 16), 3);
        assert_eq!(bucket_index(u32::MAX, 24), u32::MAX as usize % 24);
        assert_eq!(bucket_index(0, 1), 0);
    }
}
