//! Cache Configuration Module
//!
//! This module provides configuration structures for the cache implementations.
//! Each cache type has its own dedicated configuration struct with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//!
//! Validation lives in [`CacheBuilder`](crate::builder::CacheBuilder). A config
//! handed straight to a constructor is taken as-is, so a `capacity` of zero
//! yields a cache that retains nothing.
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Least Recently Used |
//! | `LfuCacheConfig` | [`LfuCache`](crate::LfuCache) | Least Frequently Used |
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::LruCacheConfig;
//! use policy_cache::LruCache;
//! use std::time::Duration;
//!
//! let config = LruCacheConfig {
//!     capacity: 1000,
//!     default_ttl: Some(Duration::from_secs(60)),
//! };
//!
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert_eq!(cache.cap(), 1000);
//! ```

pub mod lfu;
pub mod lru;

pub use lfu::LfuCacheConfig;
pub use lru::LruCacheConfig;
