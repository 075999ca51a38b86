//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::services::CheckResult;

/// Health check response structure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2024-01-01T12:00:00Z",
    "checks": {
        "database": {
            "status": "healthy",
            "message": "Connected",
            "response_time_ms": 5
        }
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Time of the check (RFC 3339)
    #[schema(value_type = String, format = DateTime, example = "2024-01-01T12:00:00Z")]
    pub timestamp: String,
    /// Per-dependency results
    pub checks: HashMap<String, ComponentHealth>,
}

impl HealthResponse {
    /// Overall status is the worst status among `checks`.
    pub fn from_checks(checks: HashMap<String, ComponentHealth>) -> Self {
        let status = if checks
            .values()
            .any(|check| check.status == HealthStatus::Unhealthy)
        {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: jiff::Timestamp::now().to_string(),
            checks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health information.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[schema(example = "Connected")]
    pub message: Option<String>,
    #[schema(example = 5)]
    pub response_time_ms: Option<u64>,
}

impl From<CheckResult> for ComponentHealth {
    fn from(result: CheckResult) -> Self {
        Self {
            status: if result.healthy {
                HealthStatus::Healthy
            } else {
                HealthStatus::Unhealthy
            },
            message: Some(result.message),
            response_time_ms: Some(result.response_time_ms),
        }
    }
}
