//! Layered configuration.
//!
//! Priority, lowest first:
//! 1. `default.toml`
//! 2. `{environment}.toml`
//! 3. `local.toml` (not committed)
//! 4. `MARKETPLACE_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    CacheBackend, CacheConfig, DatabaseConfig, JwtConfig, LoggerSettings, MemoryCacheConfig,
    RedisCacheConfig, ServerConfig, Settings,
};
