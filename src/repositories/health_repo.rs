use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};

/// Database reachability check backing `/health/ready`.
#[async_trait]
pub trait HealthRepository: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgHealthRepository {
    pool: AsyncDbPool,
}

impl PgHealthRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthRepository for PgHealthRepository {
    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }
}
