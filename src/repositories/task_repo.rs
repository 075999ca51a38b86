//! Task repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::ToDiesel;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::Task;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, task_id: Uuid) -> AppResult<Option<Task>>;

    /// Points the task at `target` and refreshes `updated_at`.
    /// Returns the number of rows written.
    async fn update_sub_sub_category(&self, task_id: Uuid, target: Uuid) -> AppResult<usize>;
}

#[derive(Clone)]
pub struct PgTaskRepository {
    pool: AsyncDbPool,
}

impl PgTaskRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_by_id(&self, task_id: Uuid) -> AppResult<Option<Task>> {
        use crate::schema::tasks::dsl::*;
        let mut conn = self.pool.get().await?;

        tasks
            .filter(id.eq(task_id))
            .select(Task::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn update_sub_sub_category(&self, task_id: Uuid, target: Uuid) -> AppResult<usize> {
        use crate::schema::tasks::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(tasks.filter(id.eq(task_id)))
            .set((
                sub_sub_category_id.eq(Some(target)),
                updated_at.eq(jiff::Timestamp::now().to_diesel()),
            ))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
