//! The contract shared by every eviction policy.
//!
//! [`LruCache`](crate::LruCache), [`LfuCache`](crate::LfuCache) and
//! [`PolicyCache`](crate::PolicyCache) all implement [`Cache`], and the
//! decorators in [`concurrent`](crate::concurrent) are written against it.
//!
//! # Expiration
//!
//! Expiry is lazy. An entry whose TTL has elapsed is treated as absent by
//! every operation and is purged by the first mutating operation that finds
//! it. [`Cache::peek`] is the only read that never purges, since it takes
//! `&self`.

use core::borrow::Borrow;
use core::hash::Hash;
use std::time::Duration;

use crate::metrics::CacheStats;

/// A bounded key-value cache with an eviction policy and optional TTLs.
///
/// # Examples
///
/// ```
/// use policy_cache::{Cache, LruCache};
///
/// fn warm<C: Cache<&'static str, u32>>(cache: &mut C) {
///     cache.put("a", 1);
///     cache.put("b", 2);
/// }
///
/// let mut cache = LruCache::new(2);
/// warm(&mut cache);
/// assert_eq!(cache.get("a"), Some(&1));
/// assert_eq!(cache.len(), 2);
/// ```
pub trait Cache<K, V> {
    /// Returns the live value for `key` and records the access.
    ///
    /// On a hit the policy bookkeeping is updated (recency for LRU, frequency
    /// for LFU) and `hits` is incremented. A missing or expired key counts as a
    /// miss, and an expired entry is purged as part of the call.
    fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Inserts or replaces `key` with the cache's default TTL.
    fn put(&mut self, key: K, value: V);

    /// Inserts or replaces `key` with an explicit TTL.
    ///
    /// `None` stores an entry that never expires, regardless of the default.
    /// Replacing a live key counts as an access and never evicts. Inserting a
    /// new key into a full cache evicts exactly one entry first.
    fn put_with_ttl(&mut self, key: K, value: V, ttl: Option<Duration>);

    /// Removes `key` regardless of its TTL, returning the value if it was stored.
    fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Returns true if `key` has a live entry.
    ///
    /// An expired entry is purged. Recency, frequency and hit/miss counters
    /// are left alone.
    fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Returns the live value for `key` without recording an access.
    ///
    /// Expired entries read as absent but stay in place until purged.
    fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Purges expired entries and returns the remaining keys, next eviction
    /// victim last for LRU and first for LFU.
    fn keys(&mut self) -> Vec<K>
    where
        K: Clone;

    /// Purges every expired entry, returning how many were dropped.
    fn cleanup_expired(&mut self) -> usize;

    /// Drops every entry. Lifetime counters are kept.
    fn clear(&mut self);

    /// Number of stored entries, including expired ones not yet purged.
    fn len(&self) -> usize;

    /// Returns true if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn cap(&self) -> usize;

    /// Snapshot of the cache's counters.
    fn stats(&self) -> CacheStats;
}
