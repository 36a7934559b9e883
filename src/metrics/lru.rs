//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache algorithm.

use super::{CacheMetrics, CoreCacheMetrics};
use std::collections::BTreeMap;

/// LRU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Clone)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Times an entry was moved to the most-recently-used position by a hit
    /// or an update.
    pub promotions: u64,
}

impl LruCacheMetrics {
    /// Creates a new LruCacheMetrics instance for a cache of `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            core: CoreCacheMetrics::new(max_size),
            promotions: 0,
        }
    }

    /// Records an entry being moved to the front of the recency list.
    #[inline]
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Converts LRU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
