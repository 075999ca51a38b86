//! Response cache with runtime-selected backends.
//!
//! ```toml
//! [cache]
//! enabled = true
//! backend = "memory"  # or "redis"
//!
//! [cache.memory]
//! max_size = 1000
//! ttl_seconds = 300
//!
//! [cache.redis]
//! url = "redis://127.0.0.1:6379"
//! key_prefix = "marketplace"
//! ```
//!
//! Callers store JSON through [`CacheManager::get_json`] and
//! [`CacheManager::set_json`]. Cache failures are never fatal to a request.

mod error;
mod manager;
mod memory;
mod noop;
mod redis;
mod traits;

pub use error::CacheError;
pub use manager::CacheManager;
pub use memory::MemoryCache;
pub use noop::NoOpCache;
pub use traits::AppCache;
