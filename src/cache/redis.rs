//! Redis cache using a bb8 connection pool.

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};

use crate::cache::{AppCache, CacheError};
use crate::config::settings::RedisCacheConfig;

type RedisPool = Pool<Client>;

/// Entries live under `{key_prefix}:{cache_name}:`; `clear` only touches that namespace.
pub struct RedisCache {
    pool: RedisPool,
    namespace: String,
    default_ttl: u64,
}

impl RedisCache {
    pub async fn new(config: &RedisCacheConfig, cache_name: &str) -> Result<Self, CacheError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| CacheError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(std::time::Duration::from_secs(config.connection_timeout))
            .build(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            namespace: namespace(&config.key_prefix, cache_name),
            default_ttl: config.ttl_seconds,
        })
    }

    fn namespaced_key(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    async fn conn(&self) -> Result<PooledConnection<'_, Client>, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }
}

fn namespace(key_prefix: &str, cache_name: &str) -> String {
    format!("{}:{}", key_prefix.trim_end_matches(':'), cache_name)
}

#[async_trait]
impl AppCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.conn().await?;
        let conn: &mut MultiplexedConnection = &mut conn;

        conn.get(self.namespaced_key(key))
            .await
            .map_err(|e: RedisError| CacheError::Operation(e.to_string()))
    }

    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        let conn: &mut MultiplexedConnection = &mut conn;
        // SETEX rejects a zero expiry
        let ttl = ttl_seconds.unwrap_or(self.default_ttl).max(1);

        conn.set_ex::<_, _, ()>(self.namespaced_key(key), value, ttl)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        let conn: &mut MultiplexedConnection = &mut conn;

        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(format!("{}:*", self.namespace))
            .query_async(conn)
            .await
            .map_err(|e: RedisError| CacheError::Operation(e.to_string()))?;

        if !keys.is_empty() {
            conn.del::<_, ()>(keys)
                .await
                .map_err(|e| CacheError::Operation(e.to_string()))?;
        }

        Ok(())
    }
}
