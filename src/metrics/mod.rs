//! Cache Metrics System
//!
//! Every cache keeps a [`CoreCacheMetrics`] block of lifetime counters. Two
//! views are derived from it:
//!
//! - [`CacheStats`], a small `Copy` snapshot returned by
//!   [`Cache::stats`](crate::traits::Cache::stats) for everyday use.
//! - The [`CacheMetrics`] trait, which reports every counter (plus
//!   policy-specific ones) as a `BTreeMap<String, f64>`.
//!
//! BTreeMap is used over HashMap so that metrics always come out in the same
//! order, which keeps test assertions and printed reports reproducible.
//!
//! Counters only ever grow; `clear` resets the tracked size but not the
//! lifetime activity.

use std::collections::BTreeMap;

pub mod lfu;
pub mod lru;

pub use lfu::LfuCacheMetrics;
pub use lru::LruCacheMetrics;

/// Counters tracked by every cache policy.
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Lookups that found a live entry.
    pub hits: u64,

    /// Lookups that found nothing, or found an expired entry.
    pub misses: u64,

    /// New keys stored.
    pub insertions: u64,

    /// Values replaced on an existing live key.
    pub updates: u64,

    /// Entries dropped to make room for a new key.
    pub evictions: u64,

    /// Entries purged because their TTL had elapsed.
    pub expirations: u64,

    /// Entries removed explicitly by the caller.
    pub removals: u64,

    /// Number of entries currently stored, including any not yet purged.
    pub size: u64,

    /// Configured capacity.
    pub max_size: u64,
}

impl CoreCacheMetrics {
    /// Creates an empty metrics block for a cache of `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size: max_size as u64,
            ..Default::default()
        }
    }

    /// Records a lookup that returned a value.
    #[inline]
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Records a lookup that returned nothing.
    #[inline]
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Records a brand-new key being stored.
    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
        self.size += 1;
    }

    /// Records a value replacement on a live key. Size is unchanged.
    #[inline]
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records a capacity eviction.
    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
        self.size = self.size.saturating_sub(1);
    }

    /// Records the purge of an expired entry.
    #[inline]
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
        self.size = self.size.saturating_sub(1);
    }

    /// Records an explicit removal.
    #[inline]
    pub fn record_removal(&mut self) {
        self.removals += 1;
        self.size = self.size.saturating_sub(1);
    }

    /// Records that every entry was dropped at once.
    #[inline]
    pub fn record_clear(&mut self) {
        self.size = 0;
    }

    /// Total lookups served.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, between 0.0 and 1.0.
    ///
    /// Returns 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.requests();
        if requests > 0 {
            self.hits as f64 / requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, between 0.0 and 1.0.
    ///
    /// Returns 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        let requests = self.requests();
        if requests > 0 {
            self.misses as f64 / requests as f64
        } else {
            0.0
        }
    }

    /// How full the cache is, between 0.0 and 1.0. Zero-capacity caches report 0.0.
    pub fn utilization(&self) -> f64 {
        if self.max_size > 0 {
            self.size as f64 / self.max_size as f64
        } else {
            0.0
        }
    }

    /// Takes a [`CacheStats`] snapshot.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            expirations: self.expirations,
            size: self.size as usize,
            max_size: self.max_size as usize,
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("hits".to_string(), self.hits as f64);
        metrics.insert("misses".to_string(), self.misses as f64);
        metrics.insert("requests".to_string(), self.requests() as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("expirations".to_string(), self.expirations as f64);
        metrics.insert("removals".to_string(), self.removals as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics.insert("size".to_string(), self.size as f64);
        metrics.insert("max_size".to_string(), self.max_size as f64);
        metrics.insert("utilization".to_string(), self.utilization());

        if self.requests() > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests() as f64,
            );
        }

        metrics
    }
}

/// A point-in-time view of cache activity.
///
/// `hits`, `misses`, `evictions` and `expirations` count lifetime activity.
/// `size` and `max_size` describe the cache at the moment of the snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that returned a value.
    pub hits: u64,
    /// Lookups that returned nothing.
    pub misses: u64,
    /// Entries dropped to make room.
    pub evictions: u64,
    /// Entries purged after their TTL elapsed.
    pub expirations: u64,
    /// Entries currently stored.
    pub size: usize,
    /// Configured capacity.
    pub max_size: usize,
}

impl CacheStats {
    /// Total lookups.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.requests();
        if requests == 0 {
            0.0
        } else {
            self.hits as f64 / requests as f64
        }
    }

    /// Fraction of lookups that missed, 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        let requests = self.requests();
        if requests == 0 {
            0.0
        } else {
            self.misses as f64 / requests as f64
        }
    }
}

/// Trait that all cache policies implement for metrics reporting
///
/// This trait provides a uniform interface for retrieving metrics from any
/// cache implementation, so that policies can be compared side by side.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification, e.g. "LRU" or "LFU".
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_without_requests() {
        let metrics = CoreCacheMetrics::new(10);
        assert_eq!(metrics.hit_rate(), 0.0);
        assert_eq!(metrics.miss_rate(), 0.0);
        assert_eq!(metrics.stats().hit_rate(), 0.0);
        assert!(!metrics.to_btreemap().contains_key("eviction_rate"));
    }

    #[test]
    fn test_size_tracking() {
        let mut metrics = CoreCacheMetrics::new(4);
        metrics.record_insertion();
        metrics.record_insertion();
        metrics.record_insertion();
        metrics.record_update();
        assert_eq!(metrics.size, 3);

        metrics.record_eviction();
        metrics.record_expiration();
        assert_eq!(metrics.size, 1);

        metrics.record_removal();
        metrics.record_removal();
        assert_eq!(metrics.size, 0);

        metrics.record_insertion();
        metrics.record_clear();
        assert_eq!(metrics.size, 0);
        assert_eq!(metrics.insertions, 4);
        assert_eq!(metrics.updates, 1);
    }

    #[test]
    fn test_stats_snapshot() {
        let mut metrics = CoreCacheMetrics::new(8);
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        metrics.record_insertion();

        let stats = metrics.stats();
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert_eq!(stats.max_size, 8);
        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(stats.miss_rate(), 0.25);
    }

    #[test]
    fn test_btreemap_is_ordered() {
        let mut metrics = CoreCacheMetrics::new(2);
        metrics.record_miss();
        let map = metrics.to_btreemap();
        let keys: Vec<_> = map.keys().cloned().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(map.get("misses"), Some(&1.0));
        assert_eq!(map.get("eviction_rate"), Some(&0.0));
    }
}
