//! Concurrent Cache Usage Examples
//!
//! Multi-threaded usage patterns for `ThreadSafeCache` and `LoadingCache`.
//!
//! Run with: RUST_LOG=policy_cache=debug cargo run --example concurrent_usage

use policy_cache::{CacheBuilder, EvictionPolicy, LfuCache, ThreadSafeCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "concurrent_usage=info,policy_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Concurrent Cache Usage Examples");
    println!("================================\n");

    basic_concurrent_usage();
    println!();

    zero_copy_get_with();
    println!();

    loading_cache_single_flight();
    println!();

    throughput_comparison();
}

/// Basic multi-threaded cache usage
fn basic_concurrent_usage() {
    println!("1. Basic Concurrent Usage");
    println!("   -----------------------");

    let cache = Arc::new(
        CacheBuilder::new()
            .max_size(1000)
            .build_thread_safe::<String, usize>()
            .expect("capacity is non-zero"),
    );

    let num_threads = 4;
    let ops_per_thread = 1000;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = format!("thread{}-key{}", thread_id, i);
                    let value = thread_id * 10000 + i;

                    cache.put(key.clone(), value);

                    // Another thread may already have evicted it.
                    if let Some(v) = cache.get(&key) {
                        assert_eq!(v, value);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let stats = cache.stats();
    println!(
        "   Completed {} operations across {} threads",
        num_threads * ops_per_thread * 2,
        num_threads
    );
    println!(
        "   Final cache size: {} items (capacity {})",
        cache.len(),
        cache.cap()
    );
    println!(
        "   Hits: {}, evictions: {}",
        stats.hits, stats.evictions
    );
}

/// Zero-copy access pattern using get_with()
fn zero_copy_get_with() {
    println!("2. Zero-Copy Access with get_with()");
    println!("   ----------------------------------");

    let cache: ThreadSafeCache<String, Vec<u8>, LfuCache<String, Vec<u8>>> =
        ThreadSafeCache::new(LfuCache::new(100));

    cache.put("large_key".to_string(), vec![1u8; 1024]);

    let sum: Option<u64> = cache.get_with("large_key", |data| {
        data.iter().map(|&x| u64::from(x)).sum()
    });
    println!("   Stored 1KB of data in cache");
    println!(
        "   Computed sum without cloning: {}",
        sum.unwrap_or_default()
    );

    let frequency = cache.with_cache(|inner| inner.frequency("large_key"));
    println!("   Access frequency after one read: {:?}", frequency);
}

/// Many threads missing on one key share a single load
fn loading_cache_single_flight() {
    println!("3. LoadingCache Single-Flight Loads");
    println!("   ---------------------------------");

    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let cache = Arc::new(
        CacheBuilder::new()
            .max_size(100)
            .eviction_policy(EvictionPolicy::Lfu)
            .default_ttl(Duration::from_secs(60))
            .build_loading(move |user_id: &u64| {
                counter.fetch_add(1, Ordering::SeqCst);
                info!(user_id, "loading profile from backend");
                thread::sleep(Duration::from_millis(50));
                format!("profile-{}", user_id)
            })
            .expect("settings are valid"),
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.get(&7))
        })
        .collect();

    for handle in handles {
        let profile = handle.join().expect("Thread panicked");
        assert_eq!(profile, "profile-7");
    }

    println!(
        "   8 concurrent readers, loader ran {} time(s)",
        loads.load(Ordering::SeqCst)
    );
}

/// Rough throughput of both policies behind the lock
fn throughput_comparison() {
    println!("4. Throughput Comparison");
    println!("   ----------------------");

    let num_threads = 8;
    let ops_per_thread = 10_000;

    for policy in [EvictionPolicy::Lru, EvictionPolicy::Lfu] {
        let cache = Arc::new(
            CacheBuilder::new()
                .max_size(1000)
                .eviction_policy(policy)
                .build_thread_safe::<usize, usize>()
                .expect("capacity is non-zero"),
        );

        let start = Instant::now();
        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..ops_per_thread {
                        let key = (t * ops_per_thread + i) % 2000;
                        if i % 4 == 0 {
                            cache.put(key, i);
                        } else {
                            cache.get(&key);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("Thread panicked");
        }
        let elapsed = start.elapsed();

        let total_ops = num_threads * ops_per_thread;
        println!(
            "   {}: {} ops in {:?} ({:.0} ops/sec), hit rate {:.1}%",
            policy,
            total_ops,
            elapsed,
            total_ops as f64 / elapsed.as_secs_f64(),
            cache.stats().hit_rate() * 100.0
        );
    }
}
