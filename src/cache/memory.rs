//! In-process cache backed by `cached::TimedSizedCache`.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use cached::{Cached, TimedSizedCache};

use crate::cache::{AppCache, CacheError};
use crate::config::settings::MemoryCacheConfig;

struct Entry {
    expires_at: Instant,
    value: Vec<u8>,
}

/// Size-bounded cache. The configured TTL caps every entry's lifetime; a
/// shorter per-entry TTL passed to `set` is honoured on read.
pub struct MemoryCache {
    store: Mutex<TimedSizedCache<String, Entry>>,
    default_ttl: Duration,
}

impl MemoryCache {
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let default_ttl = Duration::from_secs(config.ttl_seconds);
        let store = TimedSizedCache::with_size_and_lifespan(config.max_size, default_ttl);
        Self {
            store: Mutex::new(store),
            default_ttl,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, TimedSizedCache<String, Entry>>, CacheError> {
        self.store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))
    }
}

#[async_trait]
impl AppCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut store = self.lock()?;
        match store.cache_get(key) {
            None => return Ok(None),
            Some(entry) if Instant::now() < entry.expires_at => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => {}
        }
        store.cache_remove(key);
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let ttl = ttl_seconds
            .map(Duration::from_secs)
            .map_or(self.default_ttl, |ttl| ttl.min(self.default_ttl));
        let entry = Entry {
            expires_at: Instant::now() + ttl,
            value,
        };
        self.lock()?.cache_set(key.to_string(), entry);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.lock()?.cache_clear();
        Ok(())
    }
}
