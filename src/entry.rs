//! Cache Entry Type
//!
//! This module provides the `CacheEntry<V>` record stored for every live key,
//! regardless of eviction policy. Policy bookkeeping (list position, access
//! frequency) lives beside the entry in the owning cache, not inside it.
//!
//! # Timestamps
//!
//! - `created_at`: when the entry was first inserted.
//! - `expires_at`: absolute expiry instant, `None` for entries that never expire.
//! - `last_accessed`: refreshed on every successful `get`.
//!
//! Instants come from the owning cache's [`Clock`](crate::clock::Clock), so
//! entries carry no notion of time of their own.
//!
//! # Examples
//!
//! ```
//! use policy_cache::entry::CacheEntry;
//! use std::time::{Duration, Instant};
//!
//! let now = Instant::now();
//! let entry = CacheEntry::new("value", Some(Duration::from_secs(5)), now);
//! assert!(!entry.is_expired(now));
//! assert!(entry.is_expired(now + Duration::from_secs(5)));
//! ```

use core::fmt;
use std::time::{Duration, Instant};

/// A stored value plus its lifetime metadata.
///
/// Invariant: `expires_at`, if present, is never earlier than `created_at`.
pub struct CacheEntry<V> {
    /// The cached value.
    pub value: V,

    created_at: Instant,

    expires_at: Option<Instant>,

    last_accessed: Instant,
}

impl<V> CacheEntry<V> {
    /// Creates an entry inserted at `now` that expires `ttl` later.
    ///
    /// A `ttl` of `None` means the entry never expires.
    #[inline]
    pub fn new(value: V, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: expiry(now, ttl),
            last_accessed: now,
        }
    }

    /// Replaces the value and restarts the TTL from `now`.
    ///
    /// `created_at` is kept, since the key was never absent. Returns the old value.
    pub fn replace(&mut self, value: V, ttl: Option<Duration>, now: Instant) -> V {
        self.expires_at = expiry(now, ttl);
        self.last_accessed = now;
        core::mem::replace(&mut self.value, value)
    }

    /// Records an access at `now`.
    #[inline]
    pub fn touch(&mut self, now: Instant) {
        self.last_accessed = now;
    }

    /// Returns true once `now` has reached the expiry instant.
    #[inline]
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Time left before expiry at `now`.
    ///
    /// `None` for entries without a TTL, `Some(Duration::ZERO)` once expired.
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }

    /// When the entry was inserted.
    #[inline]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// When the entry expires, if ever.
    #[inline]
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// When the entry was last read or written.
    #[inline]
    pub fn last_accessed(&self) -> Instant {
        self.last_accessed
    }

    /// Consumes the entry and returns its value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}

/// Absolute expiry for a TTL starting at `now`.
///
/// A TTL too large to represent is treated as never expiring.
fn expiry(now: Instant, ttl: Option<Duration>) -> Option<Instant> {
    ttl.and_then(|ttl| now.checked_add(ttl))
}

impl<V: Clone> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            last_accessed: self.last_accessed,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for CacheEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("value", &self.value)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("last_accessed", &self.last_accessed)
            .finish()
    }
}
