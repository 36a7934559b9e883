//! Construction errors.
//!
//! Cache misses and expiry are never errors; they surface as `None`. The only
//! failure mode is an invalid configuration handed to
//! [`CacheBuilder`](crate::builder::CacheBuilder), which fails at build time
//! rather than on first use.

use thiserror::Error;

/// An invalid cache configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_size` was zero, so the cache could never retain an entry.
    #[error("max_size must be greater than zero")]
    ZeroCapacity,

    /// The default TTL was zero, so every entry would expire on insert.
    #[error("default_ttl must be greater than zero")]
    ZeroTtl,
}
