//! Existence checks over the three classification levels.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn category_exists(&self, category_id: Uuid) -> AppResult<bool>;

    async fn sub_category_exists(&self, sub_category_id: Uuid) -> AppResult<bool>;

    async fn sub_sub_category_exists(&self, sub_sub_category_id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: AsyncDbPool,
}

impl PgCategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn category_exists(&self, category_id: Uuid) -> AppResult<bool> {
        use crate::schema::category::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(exists(category.filter(id.eq(category_id))))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn sub_category_exists(&self, sub_category_id: Uuid) -> AppResult<bool> {
        use crate::schema::sub_category::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(exists(sub_category.filter(id.eq(sub_category_id))))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn sub_sub_category_exists(&self, sub_sub_category_id: Uuid) -> AppResult<bool> {
        use crate::schema::sub_sub_category::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(exists(sub_sub_category.filter(id.eq(sub_sub_category_id))))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
