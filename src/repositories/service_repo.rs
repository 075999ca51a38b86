//! Service repository.
//!
//! The plain and sub-sub-category listings go through hand-written SQL so the
//! predicate can be switched without changing the query shape; the parent
//! category listings use the query builder.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use jiff_diesel::ToDiesel;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewService, Service, UpdateService};
use crate::utils::PageRequest;

const SERVICE_COLUMNS: &str = "id, title, title_en, sub_sub_category_id, created_at, updated_at";

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Page of services, newest first, with the total number of matches.
    /// `None` matches every service.
    async fn find_many(
        &self,
        sub_sub_category_id: Option<Uuid>,
        page: PageRequest,
    ) -> AppResult<(Vec<Service>, i64)>;

    async fn find_many_by_category(
        &self,
        category_id: Uuid,
        page: PageRequest,
    ) -> AppResult<(Vec<Service>, i64)>;

    async fn find_many_by_sub_category(
        &self,
        sub_category_id: Uuid,
        page: PageRequest,
    ) -> AppResult<(Vec<Service>, i64)>;

    async fn find_by_id(&self, service_id: Uuid) -> AppResult<Option<Service>>;

    async fn find_by_title(&self, service_title: &str) -> AppResult<Option<Service>>;

    async fn create(&self, new_service: NewService) -> AppResult<Service>;

    /// Applies `changes` and refreshes `updated_at`. `None` when no row has that id.
    async fn update(&self, service_id: Uuid, changes: UpdateService)
    -> AppResult<Option<Service>>;
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

fn predicate(filtered: bool) -> &'static str {
    if filtered {
        "sub_sub_category_id = $1"
    } else {
        "1=1"
    }
}

/// Row query for the listing. Binds are the optional filter, then limit and offset.
fn listing_sql(filtered: bool) -> String {
    let (limit, offset) = if filtered { ("$2", "$3") } else { ("$1", "$2") };
    format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE {} ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}",
        predicate(filtered)
    )
}

fn count_sql(filtered: bool) -> String {
    format!(
        "SELECT COUNT(*) AS total FROM services WHERE {}",
        predicate(filtered)
    )
}

#[derive(Clone)]
pub struct PgServiceRepository {
    pool: AsyncDbPool,
}

impl PgServiceRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn load_page(
        &self,
        sub_sub_category_id: Option<Uuid>,
        page: PageRequest,
    ) -> AppResult<Vec<Service>> {
        let mut conn = self.pool.get().await?;

        let mut query = diesel::sql_query(listing_sql(sub_sub_category_id.is_some()))
            .into_boxed::<Pg>();
        if let Some(filter) = sub_sub_category_id {
            query = query.bind::<SqlUuid, _>(filter);
        }

        query
            .bind::<BigInt, _>(page.limit())
            .bind::<BigInt, _>(page.offset())
            .load::<Service>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn count_matching(&self, sub_sub_category_id: Option<Uuid>) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        let mut query =
            diesel::sql_query(count_sql(sub_sub_category_id.is_some())).into_boxed::<Pg>();
        if let Some(filter) = sub_sub_category_id {
            query = query.bind::<SqlUuid, _>(filter);
        }

        query
            .get_result::<CountRow>(&mut conn)
            .await
            .map(|row| row.total)
            .map_err(AppError::from)
    }

    /// Pages the services hanging off any of `parents`.
    async fn page_by_parents(
        &self,
        parents: Vec<Uuid>,
        page: PageRequest,
    ) -> AppResult<(Vec<Service>, i64)> {
        use crate::schema::services::dsl::*;

        if parents.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let rows = async {
            let mut conn = self.pool.get().await?;
            services
                .filter(sub_sub_category_id.eq_any(parents.clone()))
                .order(created_at.desc())
                .limit(page.limit())
                .offset(page.offset())
                .select(Service::as_select())
                .load(&mut conn)
                .await
                .map_err(AppError::from)
        };

        let total = async {
            let mut conn = self.pool.get().await?;
            services
                .filter(sub_sub_category_id.eq_any(parents.clone()))
                .count()
                .get_result::<i64>(&mut conn)
                .await
                .map_err(AppError::from)
        };

        futures::try_join!(rows, total)
    }
}

#[async_trait]
impl ServiceRepository for PgServiceRepository {
    async fn find_many(
        &self,
        sub_sub_category_id: Option<Uuid>,
        page: PageRequest,
    ) -> AppResult<(Vec<Service>, i64)> {
        futures::try_join!(
            self.load_page(sub_sub_category_id, page),
            self.count_matching(sub_sub_category_id)
        )
    }

    async fn find_many_by_category(
        &self,
        parent_id: Uuid,
        page: PageRequest,
    ) -> AppResult<(Vec<Service>, i64)> {
        use crate::schema::{sub_category, sub_sub_category};

        let parents = {
            let mut conn = self.pool.get().await?;
            sub_sub_category::table
                .inner_join(sub_category::table)
                .filter(sub_category::category_id.eq(parent_id))
                .select(sub_sub_category::id)
                .load::<Uuid>(&mut conn)
                .await
                .map_err(AppError::from)?
        };

        self.page_by_parents(parents, page).await
    }

    async fn find_many_by_sub_category(
        &self,
        parent_id: Uuid,
        page: PageRequest,
    ) -> AppResult<(Vec<Service>, i64)> {
        use crate::schema::sub_sub_category;

        let parents = {
            let mut conn = self.pool.get().await?;
            sub_sub_category::table
                .filter(sub_sub_category::sub_category_id.eq(parent_id))
                .select(sub_sub_category::id)
                .load::<Uuid>(&mut conn)
                .await
                .map_err(AppError::from)?
        };

        self.page_by_parents(parents, page).await
    }

    async fn find_by_id(&self, service_id: Uuid) -> AppResult<Option<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        services
            .filter(id.eq(service_id))
            .select(Service::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_title(&self, service_title: &str) -> AppResult<Option<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        services
            .filter(title.eq(service_title))
            .select(Service::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn create(&self, new_service: NewService) -> AppResult<Service> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(services)
            .values(&new_service)
            .returning(Service::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(
        &self,
        service_id: Uuid,
        changes: UpdateService,
    ) -> AppResult<Option<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(services.filter(id.eq(service_id)))
            .set((&changes, updated_at.eq(jiff::Timestamp::now().to_diesel())))
            .returning(Service::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
