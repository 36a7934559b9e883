//! Configuration for the Least Frequently Used (LFU) cache.
//!
//! LFU keeps the entries read most often. Pick it over LRU when a small set of
//! keys is hot for a long time and one-off reads should not push them out.
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::LfuCacheConfig;
//! use policy_cache::LfuCache;
//! use std::time::Duration;
//!
//! let config = LfuCacheConfig {
//!     capacity: 1000,
//!     default_ttl: Some(Duration::from_secs(300)),
//! };
//! let cache: LfuCache<String, Vec<u8>> = LfuCache::init(config, None);
//! assert_eq!(cache.cap(), 1000);
//! ```

use core::fmt;
use std::time::Duration;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold.
/// - `default_ttl`: Lifetime applied by `put`, `None` for no expiry.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
    /// Time-to-live applied to entries inserted without an explicit TTL.
    pub default_ttl: Option<Duration>,
}

impl LfuCacheConfig {
    /// Config with the given capacity and no default TTL.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            default_ttl: None,
        }
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_config_creation() {
        let config = LfuCacheConfig {
            capacity: 1000,
            default_ttl: None,
        };
        assert_eq!(config.capacity, 1000);
        assert_eq!(config, LfuCacheConfig::with_capacity(1000));
    }
}
