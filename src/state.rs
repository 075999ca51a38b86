//! Application state for Axum web framework.

use crate::cache::CacheManager;
use crate::config::JwtConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Shared handles available to every handler.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Response cache for the public listings
    pub cache: CacheManager,
    /// JWT configuration for token validation
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Wires the PostgreSQL repositories and use cases over `pool`.
    pub fn new(pool: AsyncDbPool, cache: CacheManager, jwt_config: JwtConfig) -> Self {
        Self::from_repositories(Repositories::new(pool), cache, jwt_config)
    }

    pub fn from_repositories(
        repos: Repositories,
        cache: CacheManager,
        jwt_config: JwtConfig,
    ) -> Self {
        Self {
            services: Services::new(repos),
            cache,
            jwt_config,
        }
    }
}
