use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;

/// A cached payload with the instant it was stored.
#[derive(Clone, Debug)]
struct CacheEntry {
    payload: Value,
    stored_at: Instant,
}

impl CacheEntry {
    fn new(payload: Value) -> Self {
        Self {
            payload,
            stored_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// In-memory response cache keyed by the full request URL, query string
/// included, so distinct pages never collide.
///
/// Reads return nothing once an entry's age reaches the TTL; stale entries
/// are never deleted, only overwritten by the next successful fetch.
/// Construct one per client (or per test) rather than sharing a global.
#[derive(Debug)]
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached payload for `key`, or `None` when the key is
    /// missing or its entry has outlived the TTL.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if entry.is_fresh(self.ttl) {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Stores `payload` under `key`, overwriting any previous entry.
    /// Concurrent writers race last-write-wins, which is acceptable since
    /// payloads for the same key are equivalent within the TTL window.
    pub fn put(&self, key: &str, payload: Value) {
        self.entries.insert(key.to_string(), CacheEntry::new(payload));
    }

    /// Empties the cache. Intended for test teardown.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
