//! Repository layer for data access operations.
//!
//! Each repository is an async trait with a PostgreSQL implementation, so the
//! use cases and handlers can be exercised against in-memory stores in tests.

mod category_repo;
mod health_repo;
#[cfg(test)]
pub mod memory;
mod service_repo;
mod task_repo;

use std::sync::Arc;

pub use category_repo::{CategoryRepository, PgCategoryRepository};
pub use health_repo::{HealthRepository, PgHealthRepository};
pub use service_repo::{PgServiceRepository, ServiceRepository};
pub use task_repo::{PgTaskRepository, TaskRepository};

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps the reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub services: Arc<dyn ServiceRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub health: Arc<dyn HealthRepository>,
}

impl Repositories {
    /// Creates the PostgreSQL-backed repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            services: Arc::new(PgServiceRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            tasks: Arc::new(PgTaskRepository::new(pool.clone())),
            health: Arc::new(PgHealthRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn in_memory(store: Arc<memory::InMemoryStore>) -> Self {
        Self {
            services: store.clone(),
            categories: store.clone(),
            tasks: store.clone(),
            health: store,
        }
    }
}
