//! Data Transfer Objects for API requests and responses.

mod error;
mod health;
mod service;
mod task;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use service::{
    CreateServiceRequest, ListQuery, ServiceListResponse, ServiceResponse, UpdateServiceRequest,
};
pub use task::UpdateTaskSubSubCategoryRequest;
