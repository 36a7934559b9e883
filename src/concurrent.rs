//! Concurrent Cache Decorators
//!
//! The caches in this crate are plain single-threaded data structures. This
//! module adds the two decorators that make them shareable:
//!
//! - [`ThreadSafeCache`]: wraps any [`Cache`](crate::Cache) in one
//!   `parking_lot::RwLock`, keeping a single global eviction order.
//! - [`LoadingCache`]: a `ThreadSafeCache` that fills misses from a loader,
//!   running the loader once per key even when many threads miss together.
//!
//! Both are composition, not inheritance: each holds the inner cache by value
//! and forwards to it.
//!
//! # Example
//!
//! ```
//! use policy_cache::{CacheBuilder, EvictionPolicy};
//! use std::sync::Arc;
//!
//! let cache = Arc::new(
//!     CacheBuilder::new()
//!         .max_size(1_000)
//!         .eviction_policy(EvictionPolicy::Lfu)
//!         .build_thread_safe::<String, u64>()
//!         .unwrap(),
//! );
//!
//! cache.put("hits".to_string(), 1);
//! assert_eq!(cache.get("hits"), Some(1));
//! ```

mod loading;
mod thread_safe;

pub use self::loading::LoadingCache;
pub use self::thread_safe::ThreadSafeCache;
