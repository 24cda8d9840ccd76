//! Construction parameters for `ChainHashMap`.

use crate::MapError;

/// Bucket count of a map built without an explicit capacity.
pub const DEFAULT_CAPACITY: usize = 16;

/// Growth threshold for `len / bucket_count`.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Initial bucket count and growth threshold of a map.
///
/// Values are checked when a map is built, not when they are set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapConfig {
    initial_capacity: usize,
    max_load_factor: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the ratio of entries to buckets above which the map doubles.
    pub fn with_max_load_factor(mut self, load_factor: f64) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub(crate) fn validate(&self) -> Result<(), MapError> {
        if self.initial_capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(MapError::InvalidLoadFactor(self.max_load_factor));
        }
        Ok(())
    }
}
