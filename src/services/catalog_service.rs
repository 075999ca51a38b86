//! Catalog use cases: browsing and administering services.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{NewService, Service, UpdateService};
use crate::repositories::{CategoryRepository, ServiceRepository};
use crate::services::error::{UseCaseError, UseCaseResult};
use crate::utils::{PageRequest, Paginated};

#[derive(Clone)]
pub struct CatalogService {
    services: Arc<dyn ServiceRepository>,
    categories: Arc<dyn CategoryRepository>,
}

fn paginate((rows, total): (Vec<Service>, i64), page: PageRequest) -> Paginated<Service> {
    Paginated::new(rows, u64::try_from(total).unwrap_or(0), page)
}

impl CatalogService {
    pub fn new(
        services: Arc<dyn ServiceRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            services,
            categories,
        }
    }

    /// Lists services newest first, optionally restricted to one sub-sub-category.
    ///
    /// A page past the end yields no rows and `next = None`.
    pub async fn fetch_services(
        &self,
        sub_sub_category_id: Option<Uuid>,
        page: PageRequest,
    ) -> UseCaseResult<Paginated<Service>> {
        let found = self.services.find_many(sub_sub_category_id, page).await?;
        Ok(paginate(found, page))
    }

    pub async fn fetch_by_category(
        &self,
        category_id: Uuid,
        page: PageRequest,
    ) -> UseCaseResult<Paginated<Service>> {
        if !self.categories.category_exists(category_id).await? {
            return Err(UseCaseError::not_found("category", "id", category_id));
        }

        let found = self
            .services
            .find_many_by_category(category_id, page)
            .await?;
        Ok(paginate(found, page))
    }

    pub async fn fetch_by_sub_category(
        &self,
        sub_category_id: Uuid,
        page: PageRequest,
    ) -> UseCaseResult<Paginated<Service>> {
        if !self.categories.sub_category_exists(sub_category_id).await? {
            return Err(UseCaseError::not_found(
                "sub_category",
                "id",
                sub_category_id,
            ));
        }

        let found = self
            .services
            .find_many_by_sub_category(sub_category_id, page)
            .await?;
        Ok(paginate(found, page))
    }

    pub async fn fetch_by_sub_sub_category(
        &self,
        sub_sub_category_id: Uuid,
        page: PageRequest,
    ) -> UseCaseResult<Paginated<Service>> {
        if !self
            .categories
            .sub_sub_category_exists(sub_sub_category_id)
            .await?
        {
            return Err(UseCaseError::not_found(
                "sub_sub_category",
                "id",
                sub_sub_category_id,
            ));
        }

        self.fetch_services(Some(sub_sub_category_id), page).await
    }

    pub async fn get_service(&self, service_id: Uuid) -> UseCaseResult<Service> {
        self.services
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("service", "id", service_id))
    }

    /// Creates a service under an existing sub-sub-category. Titles are unique.
    pub async fn create_service(&self, new_service: NewService) -> UseCaseResult<Service> {
        self.ensure_title_free(&new_service.title, None).await?;

        if !self
            .categories
            .sub_sub_category_exists(new_service.sub_sub_category_id)
            .await?
        {
            return Err(UseCaseError::not_found(
                "sub_sub_category",
                "id",
                new_service.sub_sub_category_id,
            ));
        }

        Ok(self.services.create(new_service).await?)
    }

    pub async fn update_service(
        &self,
        service_id: Uuid,
        changes: UpdateService,
    ) -> UseCaseResult<Service> {
        if let Some(title) = changes.title.as_deref() {
            self.ensure_title_free(title, Some(service_id)).await?;
        }

        self.services
            .update(service_id, changes)
            .await?
            .ok_or_else(|| UseCaseError::not_found("service", "id", service_id))
    }

    /// Fails when another service already uses `title`.
    async fn ensure_title_free(&self, title: &str, owner: Option<Uuid>) -> UseCaseResult<()> {
        match self.services.find_by_title(title).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(UseCaseError::ResourceAlreadyExists {
                    entity: "service",
                    field: "title",
                    value: title.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
