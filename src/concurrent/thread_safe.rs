//! Thread-safe cache decorator.
//!
//! [`ThreadSafeCache`] puts any [`Cache`] behind a single
//! `parking_lot::RwLock`. One lock keeps one global eviction order: an LRU
//! wrapped here is a true LRU, and no thread can ever observe the cache over
//! capacity.
//!
//! # Locking
//!
//! | Lock | Operations |
//! |------|------------|
//! | write | `get`, `get_with`, `put`, `put_with_ttl`, `remove`, `contains_key`, `keys`, `cleanup_expired`, `clear` |
//! | read | `peek`, `len`, `is_empty`, `cap`, `stats`, `with_cache` |
//!
//! `get` takes the write lock because every hit moves recency or frequency.
//! `contains_key` takes it because it purges an expired entry it finds.
//!
//! # Example
//!
//! ```
//! use policy_cache::concurrent::ThreadSafeCache;
//! use policy_cache::LruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ThreadSafeCache::new(LruCache::new(100)));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|i| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             cache.put(format!("key{}", i), i);
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 4);
//! ```

use core::borrow::Borrow;
use core::convert::Infallible;
use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::trace;

use crate::metrics::CacheStats;
use crate::policy::PolicyCache;
use crate::traits::Cache;

/// A cache shared between threads through a read-write lock.
///
/// Values are handed out by clone, since a reference cannot outlive the lock
/// guard. Use [`get_with`](ThreadSafeCache::get_with) to read in place.
///
/// # Type Parameters
///
/// - `K`: Key type.
/// - `V`: Value type. Must implement `Clone` for the value-returning reads.
/// - `C`: The wrapped cache, [`PolicyCache`] by default.
pub struct ThreadSafeCache<K, V, C = PolicyCache<K, V>> {
    inner: RwLock<C>,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, C> ThreadSafeCache<K, V, C>
where
    C: Cache<K, V>,
{
    /// Wraps `cache` so it can be shared between threads.
    pub fn new(cache: C) -> Self {
        ThreadSafeCache {
            inner: RwLock::new(cache),
            _marker: PhantomData,
        }
    }

    /// Unwraps the inner cache.
    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }

    /// Runs `f` against the inner cache under the read lock.
    ///
    /// Useful for policy-specific reads such as `LfuCache::frequency`.
    pub fn with_cache<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&C) -> R,
    {
        f(&self.inner.read())
    }

    /// Returns a clone of the live value for `key`, recording the access.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.write().get(key).cloned()
    }

    /// Retrieves a value and applies a function to it while holding the lock.
    ///
    /// More efficient than `get()` when you only need to read from the value,
    /// as it avoids cloning.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.write().get(key).map(f)
    }

    /// Returns a clone of the live value for `key` without recording an access.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.read().peek(key).cloned()
    }

    /// Inserts or replaces `key` with the default TTL.
    pub fn put(&self, key: K, value: V) {
        self.inner.write().put(key, value);
    }

    /// Inserts or replaces `key` with an explicit TTL. `None` never expires.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Option<Duration>) {
        self.inner.write().put_with_ttl(key, value, ttl);
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.write().remove(key)
    }

    /// Returns true if `key` has a live entry. Purges it if expired.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.write().contains_key(key)
    }

    /// Live keys in the inner cache's eviction order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.write().keys()
    }

    /// Purges every expired entry, returning how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        self.inner.write().cleanup_expired()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Maximum number of entries.
    pub fn cap(&self) -> usize {
        self.inner.read().cap()
    }

    /// Snapshot of the inner cache's counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.read().stats()
    }

    /// Returns the value for `key`, computing and storing it with `f` on a miss.
    ///
    /// Concurrent callers missing on the same key run `f` once: the first
    /// check happens through `get`, then the write lock is taken and the key
    /// re-checked before `f` runs. `f` runs while the write lock is held.
    pub fn get_or_insert_with<F>(&self, key: K, f: F) -> V
    where
        K: Hash + Eq,
        V: Clone,
        F: FnOnce() -> V,
    {
        match self.try_get_or_insert_with(key, || Ok::<V, Infallible>(f())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// If `f` fails nothing is stored and its error is returned unchanged.
    pub fn try_get_or_insert_with<E, F>(&self, key: K, f: F) -> Result<V, E>
    where
        K: Hash + Eq,
        V: Clone,
        F: FnOnce() -> Result<V, E>,
    {
        let cached = self.inner.write().get(&key).cloned();
        if let Some(value) = cached {
            return Ok(value);
        }

        let mut cache = self.inner.write();
        // Another thread may have stored the key between the two locks.
        // Peek first so a genuine miss is not counted twice.
        if cache.peek(&key).is_some() {
            if let Some(value) = cache.get(&key) {
                return Ok(value.clone());
            }
        }

        trace!("loading value for missing key");
        let value = f()?;
        cache.put(key, value.clone());
        Ok(value)
    }
}

impl<K, V, C> From<C> for ThreadSafeCache<K, V, C>
where
    C: Cache<K, V>,
{
    fn from(cache: C) -> Self {
        ThreadSafeCache::new(cache)
    }
}

impl<K, V, C: fmt::Debug> fmt::Debug for ThreadSafeCache<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadSafeCache")
            .field("inner", &self.inner)
            .finish()
    }
}
