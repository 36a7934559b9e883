//! Least Frequently Used Cache Implementation.
//!
//! The LFU (Least Frequently Used) cache evicts the least frequently accessed
//! entry when the cache reaches capacity. Every hit and every value-replacing
//! put counts as one access.
//!
//! This implementation provides better performance for workloads where certain
//! items are accessed more frequently than others over time, as it protects
//! frequently accessed items from eviction.
//!
//! # Algorithm
//!
//! Keys are grouped into frequency buckets. Each bucket is a list ordered by
//! the time the key entered it, oldest at the front. A key starts in bucket 1
//! and moves to the back of bucket `f + 1` on every access. The victim is the
//! front of the lowest non-empty bucket, so ties at the same frequency go to
//! the key that has sat there longest.
//!
//! The lowest bucket is tracked incrementally: an access can only raise it by
//! one (when it empties the minimum bucket) and an insert always resets it to
//! 1. Explicit removals may leave it pointing at a bucket that no longer
//! exists; the next eviction detects that and re-derives it.
//!
//! # Expiration
//!
//! TTL handling matches [`LruCache`](crate::LruCache): lazy, authoritative,
//! and ignored by eviction.

use crate::clock::{Clock, SystemClock};
use crate::config::LfuCacheConfig;
use crate::entry::CacheEntry;
use crate::list::{List, NodeId};
use crate::metrics::{CacheMetrics, CacheStats, LfuCacheMetrics};
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

/// Index record for one key.
struct LfuSlot<V> {
    frequency: u64,
    node: NodeId,
    entry: CacheEntry<V>,
}

/// Frequency buckets plus the tracked minimum frequency.
struct FrequencyLists<K> {
    lists: HashMap<u64, List<K>>,
    min_frequency: u64,
}

impl<K> FrequencyLists<K> {
    fn new() -> Self {
        FrequencyLists {
            lists: HashMap::new(),
            min_frequency: 1,
        }
    }

    /// Adds a brand-new key at frequency 1.
    fn insert(&mut self, key: K) -> NodeId {
        self.min_frequency = 1;
        self.lists.entry(1).or_default().push_back(key)
    }

    /// Moves the key at `node` from bucket `frequency` to the back of
    /// bucket `frequency + 1`, returning its new handle.
    fn increment(&mut self, frequency: u64, node: NodeId) -> Option<NodeId> {
        let list = self.lists.get_mut(&frequency)?;
        let key = list.remove(node)?;
        if list.is_empty() {
            self.lists.remove(&frequency);
            if frequency == self.min_frequency {
                self.min_frequency = frequency + 1;
            }
        }
        Some(self.lists.entry(frequency + 1).or_default().push_back(key))
    }

    /// Drops the key at `node` from bucket `frequency`.
    ///
    /// The minimum is not adjusted here; [`pop_victim`](Self::pop_victim)
    /// copes with it pointing at an emptied bucket.
    fn remove(&mut self, frequency: u64, node: NodeId) -> Option<K> {
        let list = self.lists.get_mut(&frequency)?;
        let key = list.remove(node)?;
        if list.is_empty() {
            self.lists.remove(&frequency);
        }
        Some(key)
    }

    /// Removes the oldest key of the lowest-frequency bucket.
    fn pop_victim(&mut self) -> Option<K> {
        if !self.lists.contains_key(&self.min_frequency) {
            self.min_frequency = self.lists.keys().copied().min()?;
        }
        let frequency = self.min_frequency;
        let list = self.lists.get_mut(&frequency)?;
        let key = list.pop_front();
        if list.is_empty() {
            self.lists.remove(&frequency);
        }
        key
    }

    /// Keys in the order they would be evicted.
    fn eviction_order(&self) -> impl Iterator<Item = &K> + '_ {
        let mut frequencies: Vec<u64> = self.lists.keys().copied().collect();
        frequencies.sort_unstable();
        frequencies
            .into_iter()
            .filter_map(move |frequency| self.lists.get(&frequency))
            .flat_map(|list| list.iter())
    }

    /// Frequencies that currently have at least one key.
    fn levels(&self) -> impl Iterator<Item = u64> + '_ {
        self.lists.keys().copied()
    }

    fn clear(&mut self) {
        self.lists.clear();
        self.min_frequency = 1;
    }
}

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// The cache tracks the frequency of access for each item and evicts the least
/// frequently used items when the cache reaches capacity. In case of a tie in
/// frequency, the item that reached that frequency first is evicted.
///
/// # Examples
///
/// ```
/// use policy_cache::LfuCache;
///
/// let mut cache = LfuCache::new(3);
///
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.put("c", 3);
///
/// // Access "a" multiple times to increase its frequency
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"a"), Some(&1));
///
/// // Add a new item, which will evict the least frequently used item
/// cache.put("d", 4);
/// assert_eq!(cache.get(&"b"), None); // "b" was evicted as it had frequency 1
/// ```
pub struct LfuCache<K, V, C = SystemClock, S = DefaultHashBuilder> {
    config: LfuCacheConfig,
    map: HashMap<K, LfuSlot<V>, S>,
    frequency_lists: FrequencyLists<K>,
    clock: C,
    metrics: LfuCacheMetrics,
}

impl<K: Hash + Eq, V> LfuCache<K, V> {
    /// Creates an LFU cache holding at most `cap` entries.
    pub fn new(cap: usize) -> LfuCache<K, V> {
        LfuCache::init(LfuCacheConfig::with_capacity(cap), None)
    }

    /// Creates an LFU cache from a config, using `hasher` or the default hasher.
    pub fn init(config: LfuCacheConfig, hasher: Option<DefaultHashBuilder>) -> LfuCache<K, V> {
        LfuCache::with_clock_and_hasher(config, SystemClock, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, C: Clock> LfuCache<K, V, C> {
    /// Creates an LFU cache that reads time from `clock`.
    pub fn with_clock(config: LfuCacheConfig, clock: C) -> Self {
        LfuCache::with_clock_and_hasher(config, clock, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V, C: Clock, S: BuildHasher> LfuCache<K, V, C, S> {
    /// Creates an LFU cache with an explicit clock and hash builder.
    pub fn with_clock_and_hasher(config: LfuCacheConfig, clock: C, hash_builder: S) -> Self {
        LfuCache {
            config,
            map: HashMap::with_capacity_and_hasher(config.capacity, hash_builder),
            frequency_lists: FrequencyLists::new(),
            clock,
            metrics: LfuCacheMetrics::new(config.capacity),
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

    /// TTL applied by [`put`](LfuCache::put).
    #[inline]
    pub fn default_ttl(&self) -> Option<Duration> {
        self.config.default_ttl
    }

    /// The clock the cache reads time from.
    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Snapshot of hit, miss, eviction and size counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.map.len(),
            ..self.metrics.core.stats()
        }
    }

    /// LFU metrics with the frequency bounds refreshed from the live buckets.
    pub fn lfu_metrics(&self) -> LfuCacheMetrics {
        let mut metrics = self.metrics.clone();
        metrics.update_frequency_levels(self.frequency_lists.levels());
        metrics
    }

    /// Drops the entry for `key` if it is stored but expired.
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
            self.frequency_lists.remove(slot.frequency, slot.node);
            self.metrics.core.record_expiration();
            debug!(len = self.map.len(), "lfu: purged expired entry");
        }
        true
    }

    /// Returns a reference to the value of `key` and counts one access.
    ///
    /// An expired entry is purged and reported as a miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(key).map(|value| &*value)
    }

    /// Returns a mutable reference to the value of `key` and counts one access.
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
                if let Some(node) = self.frequency_lists.increment(slot.frequency, slot.node) {
                    slot.node = node;
                    slot.frequency += 1;
                    self.metrics.record_frequency_increment(slot.frequency);
                }
                slot.entry.touch(now);
                self.metrics.core.record_hit();
                Some(&mut slot.entry.value)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Returns the value of `key` without counting an access.
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
    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        !self.purge_if_expired(key) && self.map.contains_key(key)
    }

    /// Current access count of a live key. New keys start at 1.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let now = self.clock.now();
        self.map
            .get(key)
            .filter(|slot| !slot.entry.is_expired(now))
            .map(|slot| slot.frequency)
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
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        let now = self.clock.now();
        self.frequency_lists.eviction_order().find_map(|key| {
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
        self.frequency_lists.remove(slot.frequency, slot.node);
        self.metrics.core.record_removal();
        Some(slot.entry.into_value())
    }

    /// Removes and returns the least frequently used live entry.
    ///
    /// Expired entries met on the way are purged.
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        let now = self.clock.now();
        loop {
            let key = self.frequency_lists.pop_victim()?;
            let slot = self.map.remove(&key)?;
            if slot.entry.is_expired(now) {
                self.metrics.core.record_expiration();
                continue;
            }
            self.metrics.core.record_removal();
            return Some((key, slot.entry.into_value()));
        }
    }

    /// Drops the least frequently used entry to make room, expired or not.
    fn evict(&mut self) -> Option<(K, V)> {
        let key = self.frequency_lists.pop_victim()?;
        let slot = self.map.remove(&key)?;
        self.metrics.core.record_eviction();
        trace!(
            frequency = slot.frequency,
            len = self.map.len(),
            "lfu: evicted least frequently used entry"
        );
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
                self.frequency_lists.remove(slot.frequency, slot.node);
                self.metrics.core.record_expiration();
            }
        }
        if !expired.is_empty() {
            debug!(
                purged = expired.len(),
                len = self.map.len(),
                "lfu: cleaned up expired entries"
            );
        }
        expired.len()
    }

    /// Purges expired entries and returns the remaining keys in eviction
    /// order: lowest frequency first, oldest first within a frequency.
    pub fn keys(&mut self) -> Vec<K>
    where
        K: Clone,
    {
        self.cleanup_expired();
        self.frequency_lists.eviction_order().cloned().collect()
    }

    /// Drops every entry. Lifetime counters are kept.
    pub fn clear(&mut self) {
        let dropped = self.map.len();
        self.map.clear();
        self.frequency_lists.clear();
        self.metrics.core.record_clear();
        debug!(dropped, "lfu: cleared");
    }
}

impl<K: Hash + Eq + Clone, V, C: Clock, S: BuildHasher> LfuCache<K, V, C, S> {
    /// Inserts or replaces `key` using the default TTL.
    ///
    /// Returns the entry pushed out by this call: the previous value of `key`
    /// on an update, or the least frequently used entry if one was evicted.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        let ttl = self.config.default_ttl;
        self.put_with_ttl(key, value, ttl)
    }

    /// Inserts or replaces `key` with an explicit TTL. `None` never expires.
    ///
    /// Replacing a live key counts as an access and never evicts. A key that
    /// is stored but expired is purged first and re-enters at frequency 1.
    pub fn put_with_ttl(&mut self, key: K, value: V, ttl: Option<Duration>) -> Option<(K, V)> {
        if self.config.capacity == 0 {
            debug!("lfu: capacity is zero, ignoring put");
            return None;
        }

        self.purge_if_expired(&key);
        let now = self.clock.now();

        if let Some(slot) = self.map.get_mut(&key) {
            let old = slot.entry.replace(value, ttl, now);
            if let Some(node) = self.frequency_lists.increment(slot.frequency, slot.node) {
                slot.node = node;
                slot.frequency += 1;
                self.metrics.record_frequency_increment(slot.frequency);
            }
            self.metrics.core.record_update();
            trace!(
                frequency = slot.frequency,
                "lfu: replaced value of existing entry"
            );
            return Some((key, old));
        }

        let mut evicted = None;
        while self.map.len() >= self.config.capacity {
            match self.evict() {
                Some(entry) => evicted = Some(entry),
                None => break,
            }
        }

        let node = self.frequency_lists.insert(key.clone());
        self.map.insert(
            key,
            LfuSlot {
                frequency: 1,
                node,
                entry: CacheEntry::new(value, ttl, now),
            },
        );
        self.metrics.core.record_insertion();
        evicted
    }
}

impl<K, V, C, S> Cache<K, V> for LfuCache<K, V, C, S>
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
        LfuCache::get(self, key)
    }

    #[inline]
    fn put(&mut self, key: K, value: V) {
        LfuCache::put(self, key, value);
    }

    #[inline]
    fn put_with_ttl(&mut self, key: K, value: V, ttl: Option<Duration>) {
        LfuCache::put_with_ttl(self, key, value, ttl);
    }

    #[inline]
    fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LfuCache::remove(self, key)
    }

    #[inline]
    fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LfuCache::contains_key(self, key)
    }

    #[inline]
    fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LfuCache::peek(self, key)
    }

    #[inline]
    fn keys(&mut self) -> Vec<K> {
        LfuCache::keys(self)
    }

    #[inline]
    fn cleanup_expired(&mut self) -> usize {
        LfuCache::cleanup_expired(self)
    }

    #[inline]
    fn clear(&mut self) {
        LfuCache::clear(self)
    }

    #[inline]
    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    #[inline]
    fn cap(&self) -> usize {
        LfuCache::cap(self)
    }

    #[inline]
    fn stats(&self) -> CacheStats {
        LfuCache::stats(self)
    }
}

impl<K: Hash + Eq, V, C: Clock, S: BuildHasher> CacheMetrics for LfuCache<K, V, C, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.lfu_metrics().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, C, S> fmt::Debug for LfuCache<K, V, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.config.capacity)
            .field("default_ttl", &self.config.default_ttl)
            .field("len", &self.map.len())
            .field("min_frequency", &self.frequency_lists.min_frequency)
            .finish()
    }
}
