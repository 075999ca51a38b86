//! Cache manager that dispatches to the configured backend.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::memory::MemoryCache;
use crate::cache::noop::NoOpCache;
use crate::cache::redis::RedisCache;
use crate::cache::{AppCache, CacheError};
use crate::config::settings::{CacheBackend, CacheConfig};

/// Handle to the configured backend, cheap to clone into application state.
#[derive(Clone)]
pub struct CacheManager {
    backend: Arc<dyn AppCache>,
}

impl CacheManager {
    /// Builds the backend named by `config`, or a no-op cache when disabled.
    ///
    /// `cache_name` namespaces Redis keys.
    pub async fn new(config: &CacheConfig, cache_name: &str) -> Result<Self, CacheError> {
        if !config.enabled {
            return Ok(Self::disabled());
        }

        let backend: Arc<dyn AppCache> = match config.backend {
            CacheBackend::Memory => Arc::new(MemoryCache::new(&config.memory)),
            CacheBackend::Redis => Arc::new(RedisCache::new(&config.redis, cache_name).await?),
        };

        Ok(Self { backend })
    }

    pub fn disabled() -> Self {
        Self {
            backend: Arc::new(NoOpCache),
        }
    }

    pub fn with_backend(backend: Arc<dyn AppCache>) -> Self {
        Self { backend }
    }

    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.backend.get(key).await
    }

    pub async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        self.backend.set(key, value, ttl_seconds).await
    }

    pub async fn clear(&self) -> Result<(), CacheError> {
        self.backend.clear().await
    }

    /// Reads and decodes a JSON entry.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encodes `value` as JSON and stores it.
    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, bytes, ttl_seconds).await
    }
}
