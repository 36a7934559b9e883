//! LRU vs LFU on the same access pattern.
//!
//! Run with: RUST_LOG=policy_cache=debug cargo run --example policy_comparison

use policy_cache::clock::MockClock;
use policy_cache::metrics::CacheMetrics;
use policy_cache::{Cache, CacheBuilder, EvictionPolicy, PolicyCache};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("Cache Policy Comparison");
    println!("=======================");
    println!("Each cache has capacity of 3 items.");
    println!("We add 4 fruits, read 'apple' several times, then add 'elderberry'.\n");

    for policy in [EvictionPolicy::Lru, EvictionPolicy::Lfu] {
        let cache = eviction_walkthrough(policy);
        print_metrics(&cache);
        println!();
    }

    println!("Skewed workload (10% of keys take 90% of reads)");
    println!("-----------------------------------------------");
    for policy in [EvictionPolicy::Lru, EvictionPolicy::Lfu] {
        let hit_rate = skewed_workload(policy);
        println!("   {}: hit rate {:.1}%", policy, hit_rate * 100.0);
    }
    println!();

    expiration_walkthrough();
}

fn eviction_walkthrough(policy: EvictionPolicy) -> PolicyCache<&'static str, i32> {
    println!("{} cache", policy);

    let mut cache = CacheBuilder::new()
        .max_size(3)
        .eviction_policy(policy)
        .build()
        .expect("capacity is non-zero");

    for (fruit, value) in [("apple", 1), ("banana", 2), ("cherry", 3), ("date", 4)] {
        if let Some((victim, _)) = cache.peek_victim().filter(|_| cache.len() == cache.cap()) {
            println!("   put {:<10} evicts {}", fruit, victim);
        } else {
            println!("   put {}", fruit);
        }
        cache.put(fruit, value);
    }

    for _ in 0..3 {
        cache.get(&"apple");
    }
    cache.get(&"cherry");

    if let Some((victim, _)) = cache.peek_victim() {
        println!("   put elderberry evicts {}", victim);
    }
    cache.put("elderberry", 5);

    let mut keys = cache.keys();
    keys.sort_unstable();
    println!("   Remaining: {:?}", keys);
    cache
}

/// Replays a deterministic skewed read stream and returns the hit rate.
fn skewed_workload(policy: EvictionPolicy) -> f64 {
    let mut cache = PolicyCache::new(policy, 100);
    // Small LCG so the stream is the same on every run.
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        state >> 33
    };

    for _ in 0..50_000 {
        let roll = next() % 100;
        let key = if roll < 90 { next() % 50 } else { 50 + next() % 950 };
        if cache.get(&key).is_none() {
            cache.put(key, key * 2);
        }
    }
    cache.stats().hit_rate()
}

fn expiration_walkthrough() {
    println!("Expiration");
    println!("----------");

    let clock = MockClock::new();
    let mut cache = CacheBuilder::new()
        .max_size(10)
        .default_ttl(Duration::from_secs(30))
        .clock(clock.clone())
        .build::<&str, &str>()
        .expect("settings are valid");

    cache.put("session", "alice");
    cache.put_with_ttl("token", "xyz", Some(Duration::from_secs(5)));
    cache.put_with_ttl("config", "v1", None);

    clock.advance(Duration::from_secs(10));
    println!("   after 10s: token present = {}", cache.contains_key(&"token"));
    println!("   session expires in {:?}", cache.expires_in(&"session"));

    clock.advance(Duration::from_secs(30));
    println!("   after 40s: purged {} entries", cache.cleanup_expired());
    println!("   remaining: {:?}", cache.keys());
}

fn print_metrics(cache: &dyn CacheMetrics) {
    let metrics: BTreeMap<String, f64> = cache.metrics();
    println!("   {} metrics:", cache.algorithm_name());
    for (name, value) in &metrics {
        if value.fract() == 0.0 {
            println!("     {:<20} {}", name, value);
        } else {
            println!("     {:<20} {:.3}", name, value);
        }
    }
}
