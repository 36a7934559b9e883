//! Single-Threaded Cache Benchmarks
//!
//! Hit, miss, update and evicting-put costs for each policy, plus the
//! runtime dispatch overhead and bulk expiry cleanup.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use policy_cache::clock::MockClock;
use policy_cache::config::{LfuCacheConfig, LruCacheConfig};
use policy_cache::{Cache, EvictionPolicy, LfuCache, LruCache, PolicyCache};
use std::time::Duration;

const CACHE_SIZE: usize = 1000;

fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    LruCache::init(LruCacheConfig::with_capacity(cap), None)
}

fn make_lfu<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
    LfuCache::init(LfuCacheConfig::with_capacity(cap), None)
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cache Operations");

    // LRU benchmarks
    {
        let mut cache = make_lru(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.put(i % CACHE_SIZE, i));
                }
            });
        });

        let mut next = CACHE_SIZE;
        group.bench_function("LRU put evicting", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    next += 1;
                    black_box(cache.put(next, next));
                }
            });
        });
    }

    // LFU benchmarks
    {
        let mut cache = make_lfu(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LFU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LFU put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.put(i % CACHE_SIZE, i));
                }
            });
        });

        let mut next = CACHE_SIZE;
        group.bench_function("LFU put evicting", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    next += 1;
                    black_box(cache.put(next, next));
                }
            });
        });
    }

    group.finish();
}

/// Runtime dispatch against the concrete types.
fn policy_dispatch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Policy Dispatch");

    for policy in [EvictionPolicy::Lru, EvictionPolicy::Lfu] {
        let mut cache = PolicyCache::new(policy, CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_with_input(BenchmarkId::new("get hit", policy), &policy, |b, _| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });
    }

    group.finish();
}

/// Bulk purge of a fully expired cache.
fn expiration_benchmark(c: &mut Criterion) {
    c.bench_function("LRU cleanup_expired 1000", |b| {
        let clock = MockClock::new();
        let config = LruCacheConfig {
            capacity: CACHE_SIZE,
            default_ttl: Some(Duration::from_millis(10)),
        };
        let mut cache = LruCache::with_clock(config, clock.clone());
        b.iter(|| {
            for i in 0..CACHE_SIZE {
                cache.put(i, i);
            }
            clock.advance_millis(10);
            black_box(cache.cleanup_expired())
        });
    });
}

criterion_group!(
    benches,
    criterion_benchmark,
    policy_dispatch_benchmark,
    expiration_benchmark
);
criterion_main!(benches);
