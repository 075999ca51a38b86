//! Backend used when `cache.enabled = false`; every lookup misses.

use async_trait::async_trait;

use crate::cache::{AppCache, CacheError};

#[derive(Debug, Default)]
pub struct NoOpCache;

#[async_trait]
impl AppCache for NoOpCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    async fn set(
        &self,
        _key: &str,
        _value: Vec<u8>,
        _ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stores_nothing() {
        let cache = NoOpCache;
        cache.set("k", b"v".to_vec(), None).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.clear().await.is_ok());
    }
}
