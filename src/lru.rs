//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides an LRU cache with O(1) operations and optional
//! per-entry time-to-live. LRU is one of the most widely used cache eviction
//! algorithms due to its simplicity and good performance for workloads with
//! temporal locality.
//!
//! # Algorithm
//!
//! The cache keeps its keys in a doubly linked list ordered by recency, most
//! recently used at the front. Every hit and every write moves the key to the
//! front; when a new key arrives at capacity the key at the back is evicted.
//! Since every touch moves a key to the front, recency is a total order and
//! there are no ties to break.
//!
//! The hash index maps each key to its list node and its [`CacheEntry`], so
//! relinking never needs a scan.
//!
//! # Expiration
//!
//! Entries may carry a TTL. Expired entries are never returned: they are
//! purged when a lookup finds them, or in bulk by
//! [`cleanup_expired`](LruCache::cleanup_expired). Eviction itself ignores
//! TTLs and always takes the least recently used entry.
//!
//! # Performance Characteristics
//!
//! - Get / Put / Remove: O(1)
//! - `keys` and `cleanup_expired`: O(n)
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access wrap it in a
//! [`ThreadSafeCache`](crate::concurrent::ThreadSafeCache).

use crate::clock::{Clock, SystemClock};
use crate::config::LruCacheConfig;
use crate::entry::CacheEntry;
use crate::list::{List, NodeId};
use crate::metrics::{CacheMetrics, CacheStats, LruCacheMetrics};
use crate::traits::Cache;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Index record for one key: where it sits in the recency list, and its entry.
struct LruSlot<V> {
    node: NodeId,
    entry: CacheEntry<V>,
}

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When the cache reaches capacity,
/// the least recently used entry will be evicted to make room for new entries.
///
/// # Examples
///
/// ```
/// use policy_cache::LruCache;
///
/// let mut cache = LruCache::new(2);
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, C = SystemClock, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<K>,
    map: HashMap<K, LruSlot<V>, S>,
    clock: C,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates an LRU cache holding at most `cap` entries, none of which expire
    /// unless given a TTL.
    pub fn new(cap: usize) -> LruCache<K, V> {
        LruCache::init(LruCacheConfig::with_capacity(cap), None)
    }

    /// Creates an LRU cache from a config, using `hasher` or the default hasher.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> LruCache<K, V> {
        LruCache::with_clock_and_hasher(config, SystemClock, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, C: Clock> LruCache<K, V, C> {
    /// Creates an LRU cache that reads time from `clock`.
    pub fn with_clock(config: LruCacheConfig, clock: C) -> Self {
        LruCache::with_clock_and_hasher(config, clock, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V, C: Clock, S: BuildHasher> LruCache<K, V, C, S> {
    /// Creates an LRU cache with an explicit clock and hash builder.
    pub fn with_clock_and_hasher(config: LruCacheConfig, clock: C, hash_builder: S) -> Self {
        LruCache {
            config,
            list: List::with_capacity(config.capacity),
            map: HashMap::with_capacity_and_hasher(config.capacity, hash_builder),
            clock,
            metrics: LruCacheMetrics::new(config.capacity),
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Number of stored entries, including expired ones not yet purged.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// TTL applied by [`put`](LruCache::put).
    #[inline]
    pub fn default_ttl(&self) -> Option<Duration> {
        self.config.default_ttl
    }

    /// The clock the cache reads time from.
    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// LRU metrics collected so far.
    #[inline]
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Snapshot of hit, miss, eviction and size counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.map.len(),
            ..self.metrics.core.stats()
        }
    }

    /// Drops the entry for `key` if it is stored but expired at `now`.
    ///
    /// Returns true if an entry was purged.
    fn purge_if_expired<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let now = self.clock.now();
        let expired = match self.map.get(key) {
            Some(slot) => slot.entry.is_expired(now),
            None => return false,
        };
        if !expired {
            return false;
        }
        if let Some(slot) = self.map.remove(key) {
            self.list.remove(slot.node);
            self.metrics.core.record_expiration();
            debug!(len = self.map.len(), "lru: purged expired entry");
        }
        true
    }

    /// Returns a reference to the value of `key`, marking it most recently used.
    ///
    /// Counts a hit or a miss. An expired entry is purged and reported as a miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(key).map(|value| &*value)
    }

    /// Returns a mutable reference to the value of `key`, marking it most
    /// recently used.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.purge_if_expired(key) {
            self.metrics.core.record_miss();
            return None;
        }
        let now = self.clock.now();
        match self.map.get_mut(key) {
            Some(slot) => {
                slot.entry.touch(now);
                self.list.move_to_front(slot.node);
                self.metrics.record_promotion();
                self.metrics.core.record_hit();
                Some(&mut slot.entry.value)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Returns the value of `key` without touching recency or counters.
    ///
    /// Expired entries read as absent but are not purged.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let now = self.clock.now();
        self.map
            .get(key)
            .filter(|slot| !slot.entry.is_expired(now))
            .map(|slot| &slot.entry.value)
    }

    /// Returns true if `key` has a live entry, purging it if expired.
    ///
    /// Recency and counters are left alone.
    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        !self.purge_if_expired(key) && self.map.contains_key(key)
    }

    /// Time left before `key` expires.
    ///
    /// `None` if the key is absent, expired, or has no TTL.
    pub fn expires_in<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let now = self.clock.now();
        self.map
            .get(key)
            .filter(|slot| !slot.entry.is_expired(now))
            .and_then(|slot| slot.entry.ttl_remaining(now))
    }

    /// Returns the entry that would be evicted next, without changing anything.
    ///
    /// Expired entries at the back are skipped.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let now = self.clock.now();
        self.list.iter().rev().find_map(|key| {
            self.map
                .get(key)
                .filter(|slot| !slot.entry.is_expired(now))
                .map(|slot| (key, &slot.entry.value))
        })
    }

    /// Removes `key` regardless of its TTL and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.map.remove(key)?;
        self.list.remove(slot.node);
        self.metrics.core.record_removal();
        Some(slot.entry.into_value())
    }

    /// Removes and returns the least recently used live entry.
    ///
    /// Expired entries found at the back on the way are purged.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let now = self.clock.now();
        loop {
            let key = self.list.pop_back()?;
            let slot = self.map.remove(&key)?;
            if slot.entry.is_expired(now) {
                self.metrics.core.record_expiration();
                continue;
            }
            self.metrics.core.record_removal();
            return Some((key, slot.entry.into_value()));
        }
    }

    /// Drops the least recently used entry to make room, expired or not.
    fn evict(&mut self) -> Option<(K, V)> {
        let key = self.list.pop_back()?;
        let slot = self.map.remove(&key)?;
        self.metrics.core.record_eviction();
        trace!(len = self.map.len(), "lru: evicted least recently used entry");
        Some((key, slot.entry.into_value()))
    }

    /// Purges every expired entry and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize
    where
        K: Clone,
    {
        let now = self.clock.now();
        let expired: Vec<K> = self
            .map
            .iter()
            .filter(|(_, slot)| slot.entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            if let Some(slot) = self.map.remove(key) {
                self.list.remove(slot.node);
                self.metrics.core.record_expiration();
            }
        }
        if !expired.is_empty() {
            debug!(
                purged = expired.len(),
                len = self.map.len(),
                "lru: cleaned up expired entries"
            );
        }
        expired.len()
    }

    /// Purges expired entries and returns the remaining keys, most recently
    /// used first.
    pub fn keys(&mut self) -> Vec<K>
    where
        K: Clone,
    {
        self.cleanup_expired();
        self.list.iter().cloned().collect()
    }

    /// Drops every entry. Lifetime counters are kept.
    pub fn clear(&mut self) {
        let dropped = self.map.len();
        self.map.clear();
        self.list.clear();
        self.metrics.core.record_clear();
        debug!(dropped, "lru: cleared");
    }
}

impl<K: Hash + Eq + Clone, V, C: Clock, S: BuildHasher> LruCache<K, V, C, S> {
    /// Inserts or replaces `key` using the default TTL.
    ///
    /// Returns the entry pushed out by this call: the previous value of `key`
    /// on an update, or the least recently used entry if one was evicted.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        let ttl = self.config.default_ttl;
        self.put_with_ttl(key, value, ttl)
    }

    /// Inserts or replaces `key` with an explicit TTL. `None` never expires.
    ///
    /// Updating a live key moves it to the front and never evicts. A key that
    /// is stored but expired is purged first and then inserted fresh.
    pub fn put_with_ttl(&mut self, key: K, value: V, ttl: Option<Duration>) -> Option<(K, V)> {
        if self.config.capacity == 0 {
            debug!("lru: capacity is zero, ignoring put");
            return None;
        }

        self.purge_if_expired(&key);
        let now = self.clock.now();

        if let Some(slot) = self.map.get_mut(&key) {
            let old = slot.entry.replace(value, ttl, now);
            self.list.move_to_front(slot.node);
            self.metrics.record_promotion();
            self.metrics.core.record_update();
            trace!("lru: replaced value of existing entry");
            return Some((key, old));
        }

        let mut evicted = None;
        while self.map.len() >= self.config.capacity {
            match self.evict() {
                Some(entry) => evicted = Some(entry),
                None => break,
            }
        }

        let node = self.list.push_front(key.clone());
        self.map.insert(
            key,
            LruSlot {
                node,
                entry: CacheEntry::new(value, ttl, now),
            },
        );
        self.metrics.core.record_insertion();
        debug_assert_eq!(self.list.len(), self.map.len());
        evicted
    }
}

impl<K, V, C, S> Cache<K, V> for LruCache<K, V, C, S>
where
    K: Hash + Eq + Clone,
    C: Clock,
    S: BuildHasher,
{
    #[inline]
    fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LruCache::get(self, key)
    }

    #[inline]
    fn put(&mut self, key: K, value: V) {
        LruCache::put(self, key, value);
    }

    #[inline]
    fn put_with_ttl(&mut self, key: K, value: V, ttl: Option<Duration>) {
        LruCache::put_with_ttl(self, key, value, ttl);
    }

    #[inline]
    fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LruCache::remove(self, key)
    }

    #[inline]
    fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LruCache::contains_key(self, key)
    }

    #[inline]
    fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LruCache::peek(self, key)
    }

    #[inline]
    fn keys(&mut self) -> Vec<K> {
        LruCache::keys(self)
    }

    #[inline]
    fn cleanup_expired(&mut self) -> usize {
        LruCache::cleanup_expired(self)
    }

    #[inline]
    fn clear(&mut self) {
        LruCache::clear(self)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn cap(&self) -> usize {
        LruCache::cap(self)
    }

    #[inline]
    fn stats(&self) -> CacheStats {
        LruCache::stats(self)
    }
}

impl<K, V, C, S> CacheMetrics for LruCache<K, V, C, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, C, S> fmt::Debug for LruCache<K, V, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("default_ttl", &self.config.default_ttl)
            .field("len", &self.map.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;

    fn make_timed(cap: usize) -> (LruCache<&'static str, i32, MockClock>, MockClock) {
        let clock = MockClock::new();
        let cache = LruCache::with_clock(LruCacheConfig::with_capacity(cap), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_lru_get_put() {
        let mut cache = LruCache::new(2);
        assert_eq!(cache.put("apple", 1), None);
        assert_eq!(cache.put("banana", 2), None);
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), None);
        assert_eq!(cache.put("apple", 3).unwrap().1, 1);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.put("cherry", 4).unwrap().1, 2);
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
    }

    #[test]
    fn test_lru_get_mut() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        if let Some(v) = cache.get_mut(&"apple") {
            *v = 3;
        }
        assert_eq!(cache.get(&"apple"), Some(&3));
        cache.put("cherry", 4);
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.remove(&"apple"), Some(1));
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(&"apple"), None);
        assert_eq!(cache.remove(&"cherry"), None);
        let evicted = cache.put("cherry", 3);
        assert_eq!(evicted, None);
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), Some(&3));
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.get(&"apple");
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        // Lifetime counters survive a clear.
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().size, 0);
        cache.put("cherry", 3);
        assert_eq!(cache.get(&"cherry"), Some(&3));
    }

    #[test]
    fn test_lru_capacity_limits() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.put("cherry", 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), Some(&3));
    }

    #[test]
    fn test_lru_list_tracks_map() {
        let (mut cache, clock) = make_timed(3);
        for (key, value) in [("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)] {
            cache.put_with_ttl(key, value, Some(Duration::from_millis(50)));
            assert_eq!(cache.list.len(), cache.map.len());
        }
        cache.remove(&"d");
        assert_eq!(cache.list.len(), 2);

        clock.advance_millis(50);
        cache.put("f", 6);
        assert_eq!(cache.list.len(), cache.map.len());
        assert_eq!(cache.cleanup_expired(), 2);
        assert_eq!(cache.list.len(), 1);
        assert_eq!(cache.list.len(), cache.map.len());
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache = LruCache::new(2);
        let key1 = String::from("apple");
        let key2 = String::from("banana");
        cache.put(key1.clone(), 1);
        cache.put(key2.clone(), 2);
        assert_eq!(cache.get(&key1), Some(&1));
        assert_eq!(cache.get("apple"), Some(&1));
        assert_eq!(cache.get("banana"), Some(&2));
        assert!(cache.contains_key("banana"));
        assert_eq!(cache.remove("apple"), Some(1));
    }

    #[test]
    fn test_lru_zero_capacity_retains_nothing() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.put("apple", 1), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_lru_update_does_not_evict() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("a", 10);
        cache.put("b", 20);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.peek(&"a"), Some(&10));
    }

    #[test]
    fn test_lru_peek_does_not_promote() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.peek(&"a"), Some(&1));
        cache.put("c", 3);
        // "a" was only peeked, so it stayed least recently used.
        assert!(!cache.contains_key(&"a"));
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_lru_keys_order() {
        let mut cache = LruCache::new(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.get(&"a");
        assert_eq!(cache.keys(), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_lru_peek_and_pop_lru() {
        let mut cache = LruCache::new(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.get(&"a");
        assert_eq!(cache.peek_lru(), Some((&"b", &2)));
        assert_eq!(cache.pop_lru(), Some(("b", 2)));
        assert_eq!(cache.pop_lru(), Some(("c", 3)));
        assert_eq!(cache.pop_lru(), Some(("a", 1)));
        assert_eq!(cache.pop_lru(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_ttl_expiry_is_lazy() {
        let (mut cache, clock) = make_timed(4);
        cache.put_with_ttl("short", 1, Some(Duration::from_millis(100)));
        cache.put("forever", 2);
        assert_eq!(cache.get(&"short"), Some(&1));

        clock.advance_millis(150);
        // Still stored until something finds it.
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&"short"), None);
        assert_eq!(cache.len(), 2);

        assert_eq!(cache.get(&"short"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"forever"), Some(&2));

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expirations, 1);
    }

    #[test]
    fn test_lru_expiry_boundary() {
        let (mut cache, clock) = make_timed(2);
        cache.put_with_ttl("k", 1, Some(Duration::from_millis(100)));
        clock.advance_millis(99);
        assert!(cache.contains_key(&"k"));
        clock.advance_millis(1);
        assert!(!cache.contains_key(&"k"));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_lru_default_ttl_and_override() {
        let clock = MockClock::new();
        let config = LruCacheConfig {
            capacity: 4,
            default_ttl: Some(Duration::from_secs(1)),
        };
        let mut cache = LruCache::with_clock(config, clock.clone());
        cache.put("default", 1);
        cache.put_with_ttl("pinned", 2, None);
        assert_eq!(cache.expires_in(&"default"), Some(Duration::from_secs(1)));
        assert_eq!(cache.expires_in(&"pinned"), None);

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get(&"default"), None);
        assert_eq!(cache.get(&"pinned"), Some(&2));
    }

    #[test]
    fn test_lru_put_over_expired_entry_inserts_fresh() {
        let (mut cache, clock) = make_timed(2);
        cache.put_with_ttl("k", 1, Some(Duration::from_millis(10)));
        clock.advance_millis(20);
        // An expired value is not handed back as if it were replaced.
        assert_eq!(cache.put("k", 2), None);
        assert_eq!(cache.get(&"k"), Some(&2));
        assert_eq!(cache.stats().expirations, 1);
        assert_eq!(cache.lru_metrics().core.updates, 0);
    }

    #[test]
    fn test_lru_update_resets_ttl() {
        let (mut cache, clock) = make_timed(2);
        cache.put_with_ttl("k", 1, Some(Duration::from_millis(100)));
        clock.advance_millis(80);
        cache.put_with_ttl("k", 2, Some(Duration::from_millis(100)));
        clock.advance_millis(80);
        assert_eq!(cache.get(&"k"), Some(&2));
    }

    #[test]
    fn test_lru_cleanup_expired() {
        let (mut cache, clock) = make_timed(8);
        for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
            let ttl = if i % 2 == 0 {
                Some(Duration::from_millis(50))
            } else {
                None
            };
            cache.put_with_ttl(*key, i as i32, ttl);
        }
        clock.advance_millis(50);
        assert_eq!(cache.cleanup_expired(), 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.cleanup_expired(), 0);
        assert_eq!(cache.keys(), vec!["d", "b"]);
    }

    #[test]
    fn test_lru_pop_lru_skips_expired() {
        let (mut cache, clock) = make_timed(3);
        cache.put_with_ttl("old", 1, Some(Duration::from_millis(10)));
        cache.put("live", 2);
        clock.advance_millis(10);
        assert_eq!(cache.peek_lru(), Some((&"live", &2)));
        assert_eq!(cache.pop_lru(), Some(("live", 2)));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_lru_eviction_ignores_ttl() {
        let (mut cache, clock) = make_timed(2);
        cache.put("a", 1);
        cache.put_with_ttl("b", 2, Some(Duration::from_millis(5)));
        clock.advance_millis(10);
        // "a" is least recently used, so it goes even though "b" has expired.
        cache.put("c", 3);
        assert_eq!(cache.peek(&"a"), None);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_lru_metrics() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.get(&"missing");
        cache.put("c", 3);

        let metrics = cache.metrics();
        assert_eq!(metrics.get("hits"), Some(&1.0));
        assert_eq!(metrics.get("misses"), Some(&1.0));
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(metrics.get("insertions"), Some(&3.0));
        assert_eq!(metrics.get("size"), Some(&2.0));
        assert_eq!(metrics.get("promotions"), Some(&1.0));
        assert_eq!(cache.algorithm_name(), "LRU");
    }

    #[test]
    fn test_lru_through_trait() {
        fn fill<C: Cache<u32, u32>>(cache: &mut C) {
            for i in 0..5 {
                cache.put(i, i * 10);
            }
        }
        let mut cache = LruCache::new(3);
        fill(&mut cache);
        assert_eq!(Cache::len(&cache), 3);
        assert_eq!(Cache::keys(&mut cache), vec![4, 3, 2]);
        assert_eq!(Cache::get(&mut cache, &2), Some(&20));
    }
}
