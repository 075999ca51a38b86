//! Dependency checks for the health endpoints.

use std::sync::Arc;
use std::time::Instant;

use crate::repositories::HealthRepository;

/// Result of checking one dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub healthy: bool,
    pub message: String,
    pub response_time_ms: u64,
}

#[derive(Clone)]
pub struct HealthService {
    repo: Arc<dyn HealthRepository>,
}

impl HealthService {
    pub fn new(repo: Arc<dyn HealthRepository>) -> Self {
        Self { repo }
    }

    /// Runs `SELECT 1` through the pool. Failures are reported, not raised.
    pub async fn check_database(&self) -> CheckResult {
        let started = Instant::now();
        let outcome = self.repo.ping().await;
        let response_time_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => CheckResult {
                healthy: true,
                message: "Connected".to_string(),
                response_time_ms,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                CheckResult {
                    healthy: false,
                    message: format!("Connection failed: {}", e),
                    response_time_ms,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryStore;

    #[tokio::test]
    async fn test_reachable_database_is_healthy() {
        let service = HealthService::new(Arc::new(InMemoryStore::new()));

        let result = service.check_database().await;
        assert!(result.healthy);
        assert_eq!(result.message, "Connected");
    }

    #[tokio::test]
    async fn test_unreachable_database_is_reported() {
        let store = Arc::new(InMemoryStore::new());
        store.set_unreachable(true);
        let service = HealthService::new(store);

        let result = service.check_database().await;
        assert!(!result.healthy);
        assert!(result.message.starts_with("Connection failed"));
    }
}
