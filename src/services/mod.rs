//! Service layer for business logic operations.
//!
//! Use cases return [`UseCaseResult`]; handlers decide how each outcome maps
//! to an HTTP response.

mod catalog_service;
pub mod error;
mod health_service;
mod task_service;

pub use catalog_service::CatalogService;
pub use error::{UseCaseError, UseCaseResult};
pub use health_service::{CheckResult, HealthService};
pub use task_service::{TaskService, UpdateTaskSubSubCategory};

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning only bumps the reference counts of the repositories.
#[derive(Clone)]
pub struct Services {
    pub catalog: CatalogService,
    pub tasks: TaskService,
    pub health: HealthService,
}

impl Services {
    pub fn new(repos: Repositories) -> Self {
        Self {
            catalog: CatalogService::new(repos.services, repos.categories.clone()),
            tasks: TaskService::new(repos.tasks, repos.categories),
            health: HealthService::new(repos.health),
        }
    }
}
