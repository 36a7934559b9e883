//! Fluent cache construction.
//!
//! [`CacheBuilder`] collects a capacity, a policy, a default TTL and a clock,
//! validates them once, and builds a [`PolicyCache`] (or one of the
//! concurrent wrappers around it). Invalid settings fail at `build`, never on
//! first use.
//!
//! # Examples
//!
//! ```
//! use policy_cache::{Cache, CacheBuilder, ConfigError, EvictionPolicy};
//! use std::time::Duration;
//!
//! let mut cache = CacheBuilder::new()
//!     .max_size(500)
//!     .eviction_policy(EvictionPolicy::Lfu)
//!     .default_ttl(Duration::from_secs(30))
//!     .build::<String, Vec<u8>>()?;
//!
//! cache.put("blob".to_string(), vec![1, 2, 3]);
//! assert_eq!(cache.cap(), 500);
//!
//! let err = CacheBuilder::new().max_size(0).build::<u8, u8>().unwrap_err();
//! assert_eq!(err, ConfigError::ZeroCapacity);
//! # Ok::<(), ConfigError>(())
//! ```

use core::hash::Hash;
use std::time::Duration;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::ConfigError;
use crate::policy::{EvictionPolicy, PolicyCache};

#[cfg(feature = "concurrent")]
use crate::concurrent::{LoadingCache, ThreadSafeCache};

/// Capacity used when [`CacheBuilder::max_size`] is never called.
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Builder for [`PolicyCache`] and its concurrent wrappers.
///
/// Defaults: [`DEFAULT_MAX_SIZE`] entries, LRU, no default TTL, the system clock.
#[derive(Debug, Clone)]
#[must_use]
pub struct CacheBuilder<C = SystemClock> {
    max_size: usize,
    policy: EvictionPolicy,
    default_ttl: Option<Duration>,
    clock: C,
}

impl CacheBuilder {
    /// Starts a builder with the defaults.
    pub fn new() -> Self {
        CacheBuilder {
            max_size: DEFAULT_MAX_SIZE,
            policy: EvictionPolicy::default(),
            default_ttl: None,
            clock: SystemClock,
        }
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        CacheBuilder::new()
    }
}

impl<C: Clock> CacheBuilder<C> {
    /// Maximum number of entries. Must be greater than zero.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Which entry to evict when the cache is full.
    pub fn eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// TTL applied by `put`. Must be greater than zero.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Replaces the time source, typically with a
    /// [`MockClock`](crate::clock::MockClock) in tests.
    pub fn clock<C2: Clock>(self, clock: C2) -> CacheBuilder<C2> {
        CacheBuilder {
            max_size: self.max_size,
            policy: self.policy,
            default_ttl: self.default_ttl,
            clock,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.default_ttl == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTtl);
        }
        Ok(())
    }

    /// Validates the settings and builds the cache.
    pub fn build<K: Hash + Eq, V>(self) -> Result<PolicyCache<K, V, C>, ConfigError> {
        self.validate()?;
        debug!(
            policy = %self.policy,
            max_size = self.max_size,
            default_ttl = ?self.default_ttl,
            "building cache"
        );
        Ok(PolicyCache::with_clock(
            self.policy,
            self.max_size,
            self.default_ttl,
            self.clock,
        ))
    }

    /// Builds the cache wrapped in a [`ThreadSafeCache`].
    #[cfg(feature = "concurrent")]
    pub fn build_thread_safe<K, V>(
        self,
    ) -> Result<ThreadSafeCache<K, V, PolicyCache<K, V, C>>, ConfigError>
    where
        K: Hash + Eq + Clone,
    {
        self.build().map(ThreadSafeCache::new)
    }

    /// Builds the cache wrapped in a [`LoadingCache`] fed by `loader`.
    #[cfg(feature = "concurrent")]
    pub fn build_loading<K, V, F>(
        self,
        loader: F,
    ) -> Result<LoadingCache<K, V, F, PolicyCache<K, V, C>>, ConfigError>
    where
        K: Hash + Eq + Clone,
        V: Clone,
        F: Fn(&K) -> V,
    {
        let cache = self.build()?;
        Ok(LoadingCache::new(cache, loader))
    }
}
