//! Concurrent Cache Correctness Tests
//!
//! These tests validate that the thread-safe wrappers keep the eviction
//! semantics of the cache they wrap while being accessed from many threads.
//!
//! ## Test Strategy
//!
//! - Single-threaded setup followed by concurrent access, so the expected
//!   state is known
//! - One lock means one global order: policy checks are exact, not "at most"
//! - Loader calls are counted with an `AtomicUsize` to catch duplicate loads
//!
//! ## Segments
//!
//! 1. **Policy Correctness**: eviction through the wrapper matches the bare cache
//! 2. **Thread Safety Invariants**: capacity and counters stay consistent
//! 3. **Loading**: misses load once, failures store nothing

#![cfg(feature = "concurrent")]

use policy_cache::clock::MockClock;
use policy_cache::{
    CacheBuilder, EvictionPolicy, LfuCache, LoadingCache, LruCache, PolicyCache, ThreadSafeCache,
};
use scoped_threadpool::Pool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: u32 = 8;

// ============================================================================
// SEGMENT 1: POLICY CORRECTNESS UNDER CONCURRENCY
// ============================================================================

#[test]
fn test_thread_safe_lru_access_prevents_eviction() {
    let cache = ThreadSafeCache::new(LruCache::new(3));

    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);

    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for _ in 0..THREADS {
            scope.execute(|| {
                assert_eq!(cache.get(&"a"), Some(1));
            });
        }
    });

    cache.put("d", 4);
    assert!(!cache.contains_key(&"b"), "b was least recently used");
    assert!(cache.contains_key(&"a"));
    assert_eq!(cache.stats().hits, u64::from(THREADS));
}

#[test]
fn test_thread_safe_lfu_hot_keys_survive() {
    let cache = ThreadSafeCache::new(LfuCache::new(4));

    for i in 0..4 {
        cache.put(i, i);
    }

    // Keys 0 and 1 are read from every thread.
    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for _ in 0..THREADS {
            scope.execute(|| {
                cache.get(&0);
                cache.get(&1);
            });
        }
    });

    cache.put(10, 10);
    cache.put(11, 11);

    assert!(cache.contains_key(&0));
    assert!(cache.contains_key(&1));
    assert!(!cache.contains_key(&2));
    assert!(!cache.contains_key(&3));
    assert_eq!(
        cache.with_cache(|inner| inner.frequency(&0)),
        Some(u64::from(THREADS) + 1)
    );
}

#[test]
fn test_thread_safe_peek_takes_shared_lock() {
    let cache = Arc::new(ThreadSafeCache::new(PolicyCache::new(EvictionPolicy::Lru, 2)));
    cache.put(1, "one".to_string());
    cache.put(2, "two".to_string());

    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.peek(&1)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("one"));
    }

    // peek left recency alone, so 1 is still the victim.
    cache.put(3, "three".to_string());
    assert!(!cache.contains_key(&1));
    assert_eq!(cache.stats().hits, 0);
}

// ============================================================================
// SEGMENT 2: THREAD SAFETY INVARIANTS
// ============================================================================

#[test]
fn test_capacity_never_exceeded() {
    let cache = CacheBuilder::new()
        .max_size(16)
        .eviction_policy(EvictionPolicy::Lfu)
        .build_thread_safe::<u32, u32>()
        .unwrap();
    let violations = AtomicUsize::new(0);

    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for t in 0..THREADS {
            let cache = &cache;
            let violations = &violations;
            scope.execute(move || {
                for i in 0..500 {
                    let key = t * 1000 + i;
                    cache.put(key, i);
                    cache.get(&(key / 2));
                    if cache.len() > cache.cap() {
                        violations.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    assert_eq!(violations.load(Ordering::Relaxed), 0);
    assert_eq!(cache.len(), 16);
}

#[test]
fn test_counters_are_consistent() {
    let cache = ThreadSafeCache::new(LruCache::new(1_000));
    for i in 0..100u32 {
        cache.put(i, i);
    }

    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for _ in 0..THREADS {
            scope.execute(|| {
                for i in 0..200u32 {
                    cache.get(&i);
                }
            });
        }
    });

    let stats = cache.stats();
    assert_eq!(stats.hits, 100 * u64::from(THREADS));
    assert_eq!(stats.misses, 100 * u64::from(THREADS));
    assert_eq!(stats.requests(), 200 * u64::from(THREADS));
    assert_eq!(stats.evictions, 0);
}

#[test]
fn test_concurrent_puts_and_removes_settle() {
    let cache = ThreadSafeCache::new(LruCache::new(64));

    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for t in 0..THREADS {
            let cache = &cache;
            scope.execute(move || {
                for i in 0..32 {
                    let key = t * 100 + i;
                    cache.put(key, key);
                    if i % 2 == 0 {
                        cache.remove(&key);
                    }
                }
            });
        }
    });

    assert!(cache.len() <= 64);
    assert!(!cache.is_empty());
    // Every even key was removed by the thread that wrote it.
    let keys = cache.keys();
    assert!(keys.iter().all(|key| key % 2 == 1));
}

#[test]
fn test_concurrent_expiry_is_purged_once() {
    let clock = MockClock::new();
    let cache = CacheBuilder::new()
        .max_size(8)
        .default_ttl(Duration::from_millis(100))
        .clock(clock.clone())
        .build_thread_safe::<&str, u32>()
        .unwrap();

    cache.put("k", 1);
    clock.advance_millis(100);

    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for _ in 0..THREADS {
            scope.execute(|| {
                assert_eq!(cache.get(&"k"), None);
            });
        }
    });

    let stats = cache.stats();
    assert_eq!(stats.expirations, 1);
    assert_eq!(stats.misses, u64::from(THREADS));
    assert!(cache.is_empty());
}

// ============================================================================
// SEGMENT 3: LOADING
// ============================================================================

#[test]
fn test_get_or_insert_with_loads_once_per_key() {
    let cache = ThreadSafeCache::new(LruCache::new(16));
    let loads = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS as usize);

    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for _ in 0..THREADS {
            scope.execute(|| {
                barrier.wait();
                let value = cache.get_or_insert_with("config", || {
                    loads.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(20));
                    42
                });
                assert_eq!(value, 42);
            });
        }
    });

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_loading_cache_no_duplicate_loads() {
    let loads = AtomicUsize::new(0);
    let cache = LoadingCache::new(LfuCache::new(64), |key: &u32| {
        loads.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(5));
        key * 10
    });

    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for _ in 0..THREADS {
            scope.execute(|| {
                for key in 0..16u32 {
                    assert_eq!(cache.get(&key), key * 10);
                }
            });
        }
    });

    assert_eq!(loads.load(Ordering::SeqCst), 16);
    assert_eq!(cache.len(), 16);
}

#[test]
fn test_loading_cache_failed_load_stores_nothing() {
    let cache = ThreadSafeCache::new(LruCache::new(4));
    let attempts = AtomicUsize::new(0);

    let result: Result<u32, String> = cache.try_get_or_insert_with("k", || {
        attempts.fetch_add(1, Ordering::SeqCst);
        Err("backend unavailable".to_string())
    });
    assert_eq!(result, Err("backend unavailable".to_string()));
    assert!(!cache.contains_key(&"k"));

    let result: Result<u32, String> = cache.try_get_or_insert_with("k", || {
        attempts.fetch_add(1, Ordering::SeqCst);
        Ok(7)
    });
    assert_eq!(result, Ok(7));
    assert_eq!(cache.get(&"k"), Some(7));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_loading_cache_reloads_after_expiry() {
    let clock = MockClock::new();
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let cache = CacheBuilder::new()
        .max_size(4)
        .default_ttl(Duration::from_secs(1))
        .clock(clock.clone())
        .build_loading(move |key: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            key.len()
        })
        .unwrap();

    let key = "hello".to_string();
    assert_eq!(cache.get(&key), 5);
    assert_eq!(cache.get(&key), 5);
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    clock.advance(Duration::from_secs(1));
    assert_eq!(cache.get(&key), 5);
    assert_eq!(loads.load(Ordering::SeqCst), 2);
    assert_eq!(cache.stats().expirations, 1);
}
