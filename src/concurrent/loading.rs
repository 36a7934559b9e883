//! Auto-loading cache decorator.
//!
//! [`LoadingCache`] pairs a [`ThreadSafeCache`] with a loader function. A
//! `get` that misses calls the loader, stores the result and returns it, so
//! callers never see a miss. Loads go through
//! [`ThreadSafeCache::get_or_insert_with`], so concurrent misses on one key
//! run the loader once.

use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;

use tracing::trace;

use super::thread_safe::ThreadSafeCache;
use crate::metrics::CacheStats;
use crate::policy::PolicyCache;
use crate::traits::Cache;

/// A thread-safe cache that fills itself from a loader on a miss.
///
/// # Examples
///
/// ```
/// use policy_cache::concurrent::LoadingCache;
/// use policy_cache::LfuCache;
///
/// let cache = LoadingCache::new(LfuCache::new(100), |id: &u64| format!("user-{}", id));
///
/// assert_eq!(cache.get(&7), "user-7");
/// assert_eq!(cache.get_if_present(&7), Some("user-7".to_string()));
/// assert_eq!(cache.get_if_present(&8), None);
/// ```
pub struct LoadingCache<K, V, F, C = PolicyCache<K, V>> {
    cache: ThreadSafeCache<K, V, C>,
    loader: F,
}

impl<K, V, F, C> LoadingCache<K, V, F, C>
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: Fn(&K) -> V,
    C: Cache<K, V>,
{
    /// Wraps `cache`, filling misses with `loader`.
    pub fn new(cache: C, loader: F) -> Self {
        LoadingCache {
            cache: ThreadSafeCache::new(cache),
            loader,
        }
    }

    /// Returns the value for `key`, loading and storing it on a miss.
    ///
    /// Expired entries are reloaded.
    pub fn get(&self, key: &K) -> V {
        self.cache.get_or_insert_with(key.clone(), || {
            trace!("loading cache: invoking loader");
            (self.loader)(key)
        })
    }

    /// Returns the value for `key` only if it is already cached.
    pub fn get_if_present<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.cache.get(key)
    }

    /// Stores `value` for `key`, bypassing the loader.
    pub fn put(&self, key: K, value: V) {
        self.cache.put(key, value);
    }

    /// Drops the cached value for `key`; the next `get` reloads it.
    pub fn invalidate<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.cache.remove(key)
    }

    /// Drops every cached value.
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    /// Reloads `key` unconditionally and stores the fresh value.
    ///
    /// The loader runs outside the lock; readers keep seeing the old value
    /// until the new one is stored.
    pub fn refresh(&self, key: &K) -> V {
        trace!("loading cache: refreshing entry");
        let value = (self.loader)(key);
        self.cache.put(key.clone(), value.clone());
        value
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Snapshot of the underlying cache's counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The underlying thread-safe cache.
    pub fn cache(&self) -> &ThreadSafeCache<K, V, C> {
        &self.cache
    }
}

impl<K, V, F, C: fmt::Debug> fmt::Debug for LoadingCache<K, V, F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingCache")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
