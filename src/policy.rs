//! Runtime policy selection.
//!
//! [`PolicyCache`] wraps either an [`LruCache`] or an [`LfuCache`] behind one
//! type, so the policy can be picked from configuration instead of at compile
//! time. Every operation is a single `match` on the variant.

use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::{LfuCacheConfig, LruCacheConfig};
use crate::lfu::LfuCache;
use crate::lru::LruCache;
use crate::metrics::{CacheMetrics, CacheStats};
use crate::traits::Cache;

/// Which entry a full cache gives up for a new key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvictionPolicy {
    /// Least recently used.
    #[default]
    Lru,
    /// Least frequently used, ties broken by bucket entry order.
    Lfu,
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvictionPolicy::Lru => f.write_str("LRU"),
            EvictionPolicy::Lfu => f.write_str("LFU"),
        }
    }
}

/// A cache whose eviction policy is chosen at runtime.
///
/// # Examples
///
/// ```
/// use policy_cache::{Cache, EvictionPolicy, PolicyCache};
///
/// let mut cache = PolicyCache::new(EvictionPolicy::Lfu, 2);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get("a");
/// cache.put("c", 3);
///
/// assert_eq!(cache.policy(), EvictionPolicy::Lfu);
/// assert!(!cache.contains_key("b"));
/// ```
pub enum PolicyCache<K, V, C = SystemClock> {
    /// Recency-ordered variant.
    Lru(LruCache<K, V, C>),
    /// Frequency-ordered variant.
    Lfu(LfuCache<K, V, C>),
}

impl<K: Hash + Eq, V> PolicyCache<K, V> {
    /// Creates a cache of `cap` entries with the given policy and no default TTL.
    pub fn new(policy: EvictionPolicy, cap: usize) -> Self {
        PolicyCache::with_clock(policy, cap, None, SystemClock)
    }
}

impl<K: Hash + Eq, V, C: Clock> PolicyCache<K, V, C> {
    /// Creates a cache with every knob spelled out.
    pub fn with_clock(
        policy: EvictionPolicy,
        capacity: usize,
        default_ttl: Option<Duration>,
        clock: C,
    ) -> Self {
        match policy {
            EvictionPolicy::Lru => PolicyCache::Lru(LruCache::with_clock(
                LruCacheConfig {
                    capacity,
                    default_ttl,
                },
                clock,
            )),
            EvictionPolicy::Lfu => PolicyCache::Lfu(LfuCache::with_clock(
                LfuCacheConfig {
                    capacity,
                    default_ttl,
                },
                clock,
            )),
        }
    }

    /// The policy this cache evicts by.
    pub fn policy(&self) -> EvictionPolicy {
        match self {
            PolicyCache::Lru(_) => EvictionPolicy::Lru,
            PolicyCache::Lfu(_) => EvictionPolicy::Lfu,
        }
    }

    /// TTL applied by `put`.
    pub fn default_ttl(&self) -> Option<Duration> {
        match self {
            PolicyCache::Lru(cache) => cache.default_ttl(),
            PolicyCache::Lfu(cache) => cache.default_ttl(),
        }
    }

    /// Time left before `key` expires, `None` if absent, expired or unbounded.
    pub fn expires_in<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self {
            PolicyCache::Lru(cache) => cache.expires_in(key),
            PolicyCache::Lfu(cache) => cache.expires_in(key),
        }
    }

    /// The entry the policy would evict next.
    pub fn peek_victim(&self) -> Option<(&K, &V)> {
        match self {
            PolicyCache::Lru(cache) => cache.peek_lru(),
            PolicyCache::Lfu(cache) => cache.peek_lfu(),
        }
    }

    /// Removes and returns the entry the policy would evict next.
    pub fn pop_victim(&mut self) -> Option<(K, V)> {
        match self {
            PolicyCache::Lru(cache) => cache.pop_lru(),
            PolicyCache::Lfu(cache) => cache.pop_lfu(),
        }
    }

    /// The LRU variant, if that is the active policy.
    pub fn as_lru(&self) -> Option<&LruCache<K, V, C>> {
        match self {
            PolicyCache::Lru(cache) => Some(cache),
            PolicyCache::Lfu(_) => None,
        }
    }

    /// The LFU variant, if that is the active policy.
    pub fn as_lfu(&self) -> Option<&LfuCache<K, V, C>> {
        match self {
            PolicyCache::Lfu(cache) => Some(cache),
            PolicyCache::Lru(_) => None,
        }
    }
}

impl<K, V, C> From<LruCache<K, V, C>> for PolicyCache<K, V, C> {
    fn from(cache: LruCache<K, V, C>) -> Self {
        PolicyCache::Lru(cache)
    }
}

impl<K, V, C> From<LfuCache<K, V, C>> for PolicyCache<K, V, C> {
    fn from(cache: LfuCache<K, V, C>) -> Self {
        PolicyCache::Lfu(cache)
    }
}

impl<K, V, C> Cache<K, V> for PolicyCache<K, V, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            PolicyCache::Lru(cache) => cache.get(key),
            PolicyCache::Lfu(cache) => cache.get(key),
        }
    }

    fn put(&mut self, key: K, value: V) {
        match self {
            PolicyCache::Lru(cache) => {
                cache.put(key, value);
            }
            PolicyCache::Lfu(cache) => {
                cache.put(key, value);
            }
        }
    }

    fn put_with_ttl(&mut self, key: K, value: V, ttl: Option<Duration>) {
        match self {
            PolicyCache::Lru(cache) => {
                cache.put_with_ttl(key, value, ttl);
            }
            PolicyCache::Lfu(cache) => {
                cache.put_with_ttl(key, value, ttl);
            }
        }
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            PolicyCache::Lru(cache) => cache.remove(key),
            PolicyCache::Lfu(cache) => cache.remove(key),
        }
    }

    fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            PolicyCache::Lru(cache) => cache.contains_key(key),
            PolicyCache::Lfu(cache) => cache.contains_key(key),
        }
    }

    fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            PolicyCache::Lru(cache) => cache.peek(key),
            PolicyCache::Lfu(cache) => cache.peek(key),
        }
    }

    fn keys(&mut self) -> Vec<K> {
        match self {
            PolicyCache::Lru(cache) => cache.keys(),
            PolicyCache::Lfu(cache) => cache.keys(),
        }
    }

    fn cleanup_expired(&mut self) -> usize {
        match self {
            PolicyCache::Lru(cache) => cache.cleanup_expired(),
            PolicyCache::Lfu(cache) => cache.cleanup_expired(),
        }
    }

    fn clear(&mut self) {
        match self {
            PolicyCache::Lru(cache) => cache.clear(),
            PolicyCache::Lfu(cache) => cache.clear(),
        }
    }

    fn len(&self) -> usize {
        match self {
            PolicyCache::Lru(cache) => cache.len(),
            PolicyCache::Lfu(cache) => cache.len(),
        }
    }

    fn cap(&self) -> usize {
        match self {
            PolicyCache::Lru(cache) => cache.cap(),
            PolicyCache::Lfu(cache) => cache.cap(),
        }
    }

    fn stats(&self) -> CacheStats {
        match self {
            PolicyCache::Lru(cache) => cache.stats(),
            PolicyCache::Lfu(cache) => cache.stats(),
        }
    }
}

impl<K: Hash + Eq, V, C: Clock> CacheMetrics for PolicyCache<K, V, C> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        match self {
            PolicyCache::Lru(cache) => cache.metrics(),
            PolicyCache::Lfu(cache) => cache.metrics(),
        }
    }

    fn algorithm_name(&self) -> &'static str {
        match self {
            PolicyCache::Lru(cache) => cache.algorithm_name(),
            PolicyCache::Lfu(cache) => cache.algorithm_name(),
        }
    }
}

impl<K, V, C> fmt::Debug for PolicyCache<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyCache::Lru(cache) => f.debug_tuple("PolicyCache::Lru").field(cache).finish(),
            PolicyCache::Lfu(cache) => f.debug_tuple("PolicyCache::Lfu").field(cache).finish(),
        }
    }
}
