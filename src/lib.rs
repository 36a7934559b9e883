#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Picking a Policy
//!
//! | Policy | Evicts | Best Use Case |
//! |--------|--------|---------------|
//! | [`LruCache`] | Least recently used entry | Recency-driven workloads, sessions, pages |
//! | [`LfuCache`] | Least frequently used entry, oldest first on ties | Stable popularity, lookup tables |
//! | [`PolicyCache`] | Either, chosen at runtime | Policy picked from configuration |
//!
//! ## Performance Characteristics
//!
//! | Policy | Get | Put | Remove | Eviction |
//! |--------|-----|-----|--------|----------|
//! | LRU    | O(1)| O(1)| O(1)   | O(1)     |
//! | LFU    | O(1)| O(1)| O(1)   | O(1), O(levels) after a stale minimum |
//!
//! `levels` is the number of distinct live access counts. LFU `peek_lfu`
//! sorts those levels. `keys` and `cleanup_expired` walk every entry.
//!
//! ## Expiration
//!
//! Entries carry an optional deadline. Expiry is lazy: an expired entry is
//! dropped the moment an operation touches it, or in bulk by
//! `cleanup_expired`. Eviction never looks at deadlines, it follows the policy
//! alone.
//!
//! ```rust
//! use policy_cache::{Cache, LruCache};
//! use policy_cache::clock::MockClock;
//! use policy_cache::config::LruCacheConfig;
//! use std::time::Duration;
//!
//! let clock = MockClock::new();
//! let mut cache = LruCache::with_clock(LruCacheConfig::with_capacity(10), clock.clone());
//!
//! cache.put_with_ttl("session", 1, Some(Duration::from_millis(100)));
//! clock.advance_millis(99);
//! assert_eq!(cache.get(&"session"), Some(&1));
//!
//! clock.advance_millis(1);
//! assert_eq!(cache.get(&"session"), None);
//! assert_eq!(cache.stats().expirations, 1);
//! ```
//!
//! ## Runtime Policy Selection
//!
//! ```rust
//! use policy_cache::{Cache, CacheBuilder, EvictionPolicy};
//!
//! let policy = EvictionPolicy::Lfu;
//! let mut cache = CacheBuilder::new()
//!     .max_size(2)
//!     .eviction_policy(policy)
//!     .build::<&str, u32>()
//!     .unwrap();
//!
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//! for _ in 0..10 {
//!     cache.get(&"popular");
//! }
//! cache.put("new", 3); // "rare" evicted (lowest frequency)
//! assert!(cache.get(&"popular").is_some());
//! assert!(cache.get(&"rare").is_none());
//! ```
//!
//! ## Concurrent Caches
//!
//! The `concurrent` feature (on by default) adds [`ThreadSafeCache`], which
//! puts any cache behind one `RwLock`, and [`LoadingCache`], which fills
//! misses from a loader function.
//!
//! ```rust
//! # #[cfg(feature = "concurrent")]
//! # {
//! use policy_cache::CacheBuilder;
//!
//! let users = CacheBuilder::new()
//!     .max_size(1_000)
//!     .build_loading(|id: &u64| format!("user-{}", id))
//!     .unwrap();
//!
//! assert_eq!(users.get(&42), "user-42");
//! assert_eq!(users.len(), 1);
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: Least Recently Used cache
//! - [`lfu`]: Least Frequently Used cache
//! - [`policy`]: Runtime policy selection
//! - [`builder`]: Validated cache construction
//! - [`traits`]: The [`Cache`] trait shared by every cache
//! - [`entry`]: Stored values and their deadlines
//! - [`clock`]: Time sources, including a mock for tests
//! - [`config`]: Per-policy configuration structures
//! - [`metrics`]: Hit, miss and eviction counters
//! - [`error`]: Configuration errors
//! - [`concurrent`]: Thread-safe and loading wrappers (requires `concurrent` feature)

/// Stored values with their timestamps and optional deadline.
pub mod entry;

/// Index-based doubly linked list backing the eviction orders.
///
/// **Note**: This module is internal infrastructure. Node handles are only
/// meaningful to the list that issued them.
pub(crate) mod list;

/// Time sources.
///
/// Caches read the current instant through the [`Clock`](clock::Clock)
/// trait, so tests can drive expiration with a
/// [`MockClock`](clock::MockClock) instead of sleeping.
pub mod clock;

/// Cache configuration structures.
pub mod config;

/// Errors reported when a cache is built from invalid settings.
pub mod error;

/// Cache metrics system.
///
/// Every cache keeps core counters (hits, misses, insertions, evictions,
/// expirations) plus policy-specific ones, exposed through the
/// [`CacheMetrics`](metrics::CacheMetrics) trait.
pub mod metrics;

/// The [`Cache`] trait implemented by every cache in this crate.
pub mod traits;

/// Least Recently Used (LRU) cache implementation.
///
/// Evicts the entry that has gone longest without being read or written.
pub mod lru;

/// Least Frequently Used (LFU) cache implementation.
///
/// Evicts the entry with the fewest accesses. Among equally frequent entries
/// the one that reached that frequency first goes first.
pub mod lfu;

/// A cache whose eviction policy is picked at runtime.
pub mod policy;

/// Fluent, validated cache construction.
pub mod builder;

/// Concurrent cache wrappers.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

// Re-export cache types
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use policy::{EvictionPolicy, PolicyCache};

pub use builder::CacheBuilder;
pub use clock::{Clock, MockClock, SystemClock};
pub use entry::CacheEntry;
pub use error::ConfigError;
pub use metrics::{CacheMetrics, CacheStats};
pub use traits::Cache;

#[cfg(feature = "concurrent")]
pub use concurrent::{LoadingCache, ThreadSafeCache};
