// src/services/cache.rs
// DOCUMENTATION: In-memory cache for address provider responses
// PURPOSE: Avoid repeating identical keyword searches against the provider

use crate::models::AddressResult;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Clone, Debug)]
struct CacheEntry {
    results: Vec<AddressResult>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Keyword-indexed cache with a single TTL
/// DOCUMENTATION: Thread-safe; shared between workers through an Arc
pub struct AddressCache {
    store: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl AddressCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Cache key for a keyword search
    /// Keywords differing only in case or surrounding whitespace share a key
    pub fn key(keyword: &str, count: u32) -> String {
        format!("search:{}:{}", keyword.trim().to_lowercase(), count)
    }

    pub async fn get(&self, key: &str) -> Option<Vec<AddressResult>> {
        let store = self.store.read().await;

        match store.get(key) {
            Some(entry) if !entry.is_expired(Instant::now()) => {
                log::debug!("Address cache HIT for key: {}", key);
                Some(entry.results.clone())
            }
            Some(_) => {
                log::debug!("Address cache EXPIRED for key: {}", key);
                None
            }
            None => {
                log::debug!("Address cache MISS for key: {}", key);
                None
            }
        }
    }

    pub async fn set(&self, key: String, results: Vec<AddressResult>) {
        let expires_at = Instant::now() + self.ttl;
        self.store
            .write()
            .await
            .insert(key, CacheEntry { results, expires_at });
    }

    /// Drop expired entries
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, entry| !entry.is_expired(now));

        let removed = before - store.len();
        if removed > 0 {
            log::info!(
                "Address cache cleanup: removed {} expired entries ({} remaining)",
                removed,
                store.len()
            );
        }
    }
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes expired entries
pub fn start_cleanup_task(cache: Arc<AddressCache>, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;
            cache.cleanup().await;
        }
    });
}
