//! Time Sources
//!
//! Every cache reads time through a [`Clock`] so that TTL expiration can be
//! exercised deterministically. Production code uses [`SystemClock`]; tests
//! drive a [`MockClock`] forward by hand instead of sleeping.
//!
//! # Examples
//!
//! ```
//! use policy_cache::clock::{Clock, MockClock};
//! use std::time::Duration;
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_millis(250));
//! assert_eq!(clock.now() - start, Duration::from_millis(250));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// The real monotonic clock, backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<T: Clock> Clock for Arc<T> {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// A manually driven clock for tests.
///
/// Time only moves when [`advance`](MockClock::advance) is called. Clones
/// share the same offset, so a test can keep one handle while the cache owns
/// another.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    elapsed_nanos: Arc<AtomicU64>,
}

impl MockClock {
    /// Creates a mock clock frozen at the current instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a mock clock frozen at `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            elapsed_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves the clock forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Moves the clock forward by `millis` milliseconds.
    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Returns how far the clock has been advanced since creation.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }
}
