//! Time-bounded result caches
//!
//! A read after expiry behaves as a miss and evicts the entry. There
//! is no capacity bound and no background sweep; stale entries sit
//! until the next `get` on their key.

use std::time::{Duration, Instant};

use dashmap::DashMap;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// TTL-bounded memoization keyed by the fused query string
///
/// Backed by a sharded concurrent map, so simultaneous in-flight
/// requests can `get`/`set` without a global lock; the expiry check
/// and eviction only touch the key being read.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    store: DashMap<String, CacheEntry<V>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            store: DashMap::new(),
        }
    }

    /// The stored value, if present and unexpired
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        match self.store.get(key) {
            None => return None,
            Some(entry) if now < entry.expires_at => return Some(entry.value.clone()),
            Some(_) => {}
        }
        // stale entry: the read guard is dropped, evict under the key lock
        self.store.remove_if(key, |_, entry| entry.expires_at <= now);
        None
    }

    /// Store with a fresh expiry, overwriting any prior entry
    pub fn set(&self, key: String, value: V) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Number of entries currently held, expired or not
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
