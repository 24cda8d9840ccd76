//! ChainHashMap: separately chained buckets over an entry arena, with stable handles.

use crate::config::MapConfig;
use crate::murmur3::{bucket_index, KeyHasher, Murmur3};
use crate::MapError;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

/// Stable reference to an entry. Survives growth of the bucket array.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub fn key<'a, H>(&self, map: &'a ChainHashMap<H>) -> Option<&'a [u8]> {
        map.slots.get(self.0).map(|e| &*e.key)
    }

    pub fn value<H>(&self, map: &ChainHashMap<H>) -> Option<u32> {
        map.slots.get(self.0).map(|e| e.value)
    }

    pub fn value_mut<'a, H>(&self, map: &'a mut ChainHashMap<H>) -> Option<&'a mut u32> {
        map.slots.get_mut(self.0).map(|e| &mut e.value)
    }
}

#[derive(Debug)]
struct Entry {
    key: Box<[u8]>,
    value: u32,
    hash: u32,
    next: Option<DefaultKey>,
}

/// Byte-keyed map of `u32` values.
///
/// Every bucket holds the arena key of its chain head; entries link to the
/// next entry of the same chain. Growth allocates a new head array and
/// relinks the existing entries, so neither entries nor their key buffers
/// move.
pub struct ChainHashMap<H = Murmur3> {
    hasher: H,
    buckets: Vec<Option<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry>,
    config: MapConfig,
}

impl ChainHashMap {
    /// Map with 16 buckets, a 0.75 load factor and the default seed.
    pub fn new() -> Result<Self, MapError> {
        Self::with_config(MapConfig::default())
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, MapError> {
        Self::with_config(MapConfig::new().with_initial_capacity(capacity))
    }

    pub fn with_config(config: MapConfig) -> Result<Self, MapError> {
        Self::with_config_and_hasher(config, Murmur3::default())
    }
}

/// Iterator over `(key, value)` pairs. Order is unspecified.
pub struct Iter<'a> {
    it: slotmap::basic::Iter<'a, DefaultKey, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], u32);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, e)| (&*e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, H> IntoIterator for &'a ChainHashMap<H> {
    type Item = (&'a [u8], u32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<H> ChainHashMap<H> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn initial_capacity(&self) -> usize {
        self.config.initial_capacity()
    }

    pub fn max_load_factor(&self) -> f64 {
        self.config.max_load_factor()
    }

    /// Current `len / bucket_count`.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Number of entries chained in `bucket`, or `None` past the last bucket.
    pub fn chain_len(&self, bucket: usize) -> Option<usize> {
        let mut cur = *self.buckets.get(bucket)?;
        let mut n = 0;
        while let Some(k) = cur {
            n += 1;
            cur = self.slots[k].next;
        }
        Some(n)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.slots.iter(),
        }
    }

    fn exceeds_load_factor(&self, entries: usize, buckets: usize) -> bool {
        entries as f64 / buckets as f64 > self.config.max_load_factor()
    }

    /// Bucket count needed to hold `entries` without exceeding the load
    /// factor, or `None` if the current array already suffices.
    fn grown_bucket_count(&self, entries: usize) -> Result<Option<usize>, MapError> {
        let mut count = self.buckets.len();
        if !self.exceeds_load_factor(entries, count) {
            return Ok(None);
        }
        while self.exceeds_load_factor(entries, count) {
            count = count.checked_mul(2).ok_or(MapError::CapacityOverflow)?;
        }
        Ok(Some(count))
    }

    /// Moves every entry into `buckets` and makes it the live head array.
    fn relink(&mut self, mut buckets: Vec<Option<DefaultKey>>) {
        log::debug!(
            "growing map from {} to {} buckets ({} entries)",
            self.buckets.len(),
            buckets.len(),
            self.slots.len()
        );
        let count = buckets.len();
        for (k, entry) in self.slots.iter_mut() {
            let index = bucket_index(entry.hash, count);
            entry.next = buckets[index];
            buckets[index] = Some(k);
        }
        self.buckets = buckets;
    }
}

impl<H> ChainHashMap<H>
where
    H: KeyHasher,
{
    pub fn with_hasher(hasher: H) -> Result<Self, MapError> {
        Self::with_config_and_hasher(MapConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: MapConfig, hasher: H) -> Result<Self, MapError> {
        config.validate()?;
        let buckets = empty_buckets(config.initial_capacity())?;
        log::trace!(
            "created map with {} buckets, max load factor {}",
            buckets.len(),
            config.max_load_factor()
        );
        Ok(Self {
            hasher,
            buckets,
            slots: SlotMap::with_key(),
            config,
        })
    }

    fn find_slot(&self, hash: u32, key: &[u8]) -> Option<DefaultKey> {
        let mut cur = self.buckets[bucket_index(hash, self.buckets.len())];
        while let Some(k) = cur {
            let entry = &self.slots[k];
            if entry.hash == hash && *entry.key == *key {
                return Some(k);
            }
            cur = entry.next;
        }
        None
    }

    /// Inserts `value` under `key`, or overwrites the value of an existing
    /// entry and returns the previous one.
    ///
    /// A new key may grow the bucket array before this returns. Every
    /// allocation happens before the map is touched, so on `Err` the map is
    /// unchanged.
    pub fn insert<K>(&mut self, key: K, value: u32) -> Result<Option<u32>, MapError>
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();
        let hash = self.hasher.hash_key(key);
        if let Some(k) = self.find_slot(hash, key) {
            let old = core::mem::replace(&mut self.slots[k].value, value);
            return Ok(Some(old));
        }

        let owned = copy_key(key)?;
        let grown = match self.grown_bucket_count(self.len() + 1)? {
            Some(count) => Some(empty_buckets(count)?),
            None => None,
        };

        let index = bucket_index(hash, self.buckets.len());
        let next = self.buckets[index];
        let k = self.slots.insert(Entry {
            key: owned,
            value,
            hash,
            next,
        });
        self.buckets[index] = Some(k);

        if let Some(buckets) = grown {
            self.relink(buckets);
        }
        Ok(None)
    }

    pub fn get<K>(&self, key: K) -> Option<u32>
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();
        self.find_slot(self.hasher.hash_key(key), key)
            .map(|k| self.slots[k].value)
    }

    pub fn get_mut<K>(&mut self, key: K) -> Option<&mut u32>
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();
        let k = self.find_slot(self.hasher.hash_key(key), key)?;
        Some(&mut self.slots[k].value)
    }

    pub fn contains_key<K>(&self, key: K) -> bool
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();
        self.find_slot(self.hasher.hash_key(key), key).is_some()
    }

    pub fn find<K>(&self, key: K) -> Option<Handle>
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();
        self.find_slot(self.hasher.hash_key(key), key).map(Handle)
    }
}

impl<H> fmt::Debug for ChainHashMap<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainHashMap")
            .field("len", &self.len())
            .field("bucket_count", &self.bucket_count())
            .field("max_load_factor", &self.max_load_factor())
            .finish_non_exhaustive()
    }
}

fn empty_buckets(count: usize) -> Result<Vec<Option<DefaultKey>>, MapError> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(count)
        .map_err(|source| MapError::Allocation {
            buckets: count,
            source,
        })?;
    buckets.resize(count, None);
    Ok(buckets)
}

fn copy_key(key: &[u8]) -> Result<Box<[u8]>, MapError> {
    let mut owned = Vec::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|source| MapError::KeyAllocation {
            len: key.len(),
            source,
        })?;
    owned.extend_from_slice(key);
    Ok(owned.into_boxed_slice())
}
