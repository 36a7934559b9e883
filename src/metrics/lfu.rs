//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache algorithm.

use super::{CacheMetrics, CoreCacheMetrics};
use std::collections::BTreeMap;

/// LFU-specific metrics (extends CoreCacheMetrics)
///
/// LFU tracks an access count for each entry, so these metrics describe the
/// frequency distribution. The min/max bounds are refreshed by the cache from
/// its live frequency buckets, so they always describe current contents.
#[derive(Debug, Clone)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Smallest frequency among live entries, 0 when empty.
    pub min_frequency: u64,

    /// Largest frequency among live entries, 0 when empty.
    pub max_frequency: u64,

    /// Total number of frequency increments (hits and updates)
    pub frequency_increments: u64,

    /// Number of distinct frequency levels currently in use
    pub active_frequency_levels: u64,
}

impl LfuCacheMetrics {
    /// Creates a new LfuCacheMetrics instance for a cache of `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            core: CoreCacheMetrics::new(max_size),
            min_frequency: 0,
            max_frequency: 0,
            frequency_increments: 0,
            active_frequency_levels: 0,
        }
    }

    /// Records an entry's access count going up to `new_frequency`.
    pub fn record_frequency_increment(&mut self, new_frequency: u64) {
        self.frequency_increments += 1;
        if new_frequency > self.max_frequency {
            self.max_frequency = new_frequency;
        }
    }

    /// Refreshes the frequency bounds from the live bucket keys.
    pub fn update_frequency_levels<I>(&mut self, frequencies: I)
    where
        I: IntoIterator<Item = u64>,
    {
        let mut levels = 0;
        let mut min = u64::MAX;
        let mut max = 0;
        for frequency in frequencies {
            levels += 1;
            min = min.min(frequency);
            max = max.max(frequency);
        }
        self.active_frequency_levels = levels;
        if levels == 0 {
            self.min_frequency = 0;
            self.max_frequency = 0;
        } else {
            self.min_frequency = min;
            self.max_frequency = max;
        }
    }

    /// Average number of increments per hit, 0.0 before the first hit.
    pub fn average_frequency(&self) -> f64 {
        if self.core.hits > 0 {
            self.frequency_increments as f64 / self.core.hits as f64
        } else {
            0.0
        }
    }

    /// The range of frequencies currently in the cache.
    pub fn frequency_range(&self) -> u64 {
        self.max_frequency.saturating_sub(self.min_frequency)
    }

    /// Converts LFU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert("frequency_range".to_string(), self.frequency_range() as f64);
        metrics.insert(
            "frequency_increments".to_string(),
            self.frequency_increments as f64,
        );
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );
        metrics.insert("average_frequency".to_string(), self.average_frequency());

        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
