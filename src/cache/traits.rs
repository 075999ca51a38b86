//! AppCache trait definition.

use async_trait::async_trait;

use crate::cache::CacheError;

/// Byte-oriented cache backend.
#[async_trait]
pub trait AppCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value`; `ttl_seconds` overrides the backend default.
    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError>;

    /// Drops every entry owned by this cache.
    async fn clear(&self) -> Result<(), CacheError>;
}
