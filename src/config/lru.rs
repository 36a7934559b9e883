//! Configuration for the Least Recently Used (LRU) cache.
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::LruCacheConfig;
//! use policy_cache::LruCache;
//! use std::time::Duration;
//!
//! // Session cache: entries idle-evicted by recency, hard-expired after 30 minutes
//! let config = LruCacheConfig {
//!     capacity: 10_000,
//!     default_ttl: Some(Duration::from_secs(30 * 60)),
//! };
//! let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
//!
//! // Pure recency cache, nothing expires unless a TTL is given per entry
//! let config = LruCacheConfig {
//!     capacity: 500,
//!     default_ttl: None,
//! };
//! let cache: LruCache<&str, i32> = LruCache::init(config, None);
//! ```

use core::fmt;
use std::time::Duration;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// LRU evicts the least recently accessed entry when the cache reaches capacity.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold.
/// - `default_ttl`: Lifetime applied by `put`. `None` means entries never
///   expire unless `put_with_ttl` says otherwise.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
    /// Time-to-live applied to entries inserted without an explicit TTL.
    pub default_ttl: Option<Duration>,
}

impl LruCacheConfig {
    /// Config with the given capacity and no default TTL.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            default_ttl: None,
        }
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}
