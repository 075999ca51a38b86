//! Service DTOs for API requests and responses.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{NewService, Service, UpdateService};
use crate::utils::pagination::{DEFAULT_PAGE, DEFAULT_PER_PAGE};
use crate::utils::{AppQuery, Language, PageRequest, Paginated, PaginationMeta};

/// A service as shown to clients, with the title in the negotiated language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    pub id: Uuid,
    #[schema(example = "Pintura residencial")]
    pub title: String,
    pub sub_sub_category_id: Uuid,
    #[schema(value_type = String, format = DateTime, example = "2024-01-01T12:00:00Z")]
    pub created_at: String,
    #[schema(value_type = String, format = DateTime, example = "2024-01-01T12:00:00Z")]
    pub updated_at: String,
}

impl ServiceResponse {
    /// English uses `title_en`, falling back to `title` when it is empty.
    pub fn present(service: &Service, language: Language) -> Self {
        let title = match language {
            Language::En if !service.title_en.is_empty() => &service.title_en,
            _ => &service.title,
        };

        Self {
            id: service.id,
            title: title.clone(),
            sub_sub_category_id: service.sub_sub_category_id,
            created_at: service.created_at.to_jiff().to_string(),
            updated_at: service.updated_at.to_jiff().to_string(),
        }
    }
}

/// One page of services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceListResponse {
    pub data: Vec<ServiceResponse>,
    pub meta: PaginationMeta,
}

impl ServiceListResponse {
    pub fn present(page: Paginated<Service>, language: Language) -> Self {
        let page = page.map(|service| ServiceResponse::present(&service, language));
        Self {
            data: page.data,
            meta: page.meta,
        }
    }
}

/// Paging query string. Values are read leniently: anything that is not an
/// integer falls back to the default, integers are clamped into range. A
/// parameter given more than once has no single value and also falls back.
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number, 1-based
    #[param(example = "1")]
    pub page: Option<String>,
    /// Page size, 1 to 100
    #[param(example = "10")]
    pub per_page: Option<String>,
}

fn parse_or(value: Option<&str>, default: u64) -> i64 {
    value
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(default as i64)
}

/// The value of `name` when it appears exactly once.
fn single_value(pairs: &[(String, String)], name: &str) -> Option<String> {
    let mut values = pairs.iter().filter(|(key, _)| key == name);
    match (values.next(), values.next()) {
        (Some((_, value)), None) => Some(value.clone()),
        _ => None,
    }
}

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let AppQuery(pairs) =
            AppQuery::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(Self::from_pairs(&pairs))
    }
}

impl ListQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            page: single_value(pairs, "page"),
            per_page: single_value(pairs, "per_page"),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::clamped(
            parse_or(self.page.as_deref(), DEFAULT_PAGE),
            parse_or(self.per_page.as_deref(), DEFAULT_PER_PAGE),
        )
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 255, message = "service.title.length"))]
    #[schema(example = "Pintura residencial")]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "service.title_en.length"))]
    #[schema(example = "House painting")]
    pub title_en: String,
    pub sub_sub_category_id: Uuid,
}

impl From<CreateServiceRequest> for NewService {
    fn from(request: CreateServiceRequest) -> Self {
        Self {
            title: request.title,
            title_en: request.title_en,
            sub_sub_category_id: request.sub_sub_category_id,
        }
    }
}

/// Partial update; omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, max = 255, message = "service.title.length"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255, message = "service.title_en.length"))]
    pub title_en: Option<String>,
}

impl From<UpdateServiceRequest> for UpdateService {
    fn from(request: UpdateServiceRequest) -> Self {
        Self {
            title: request.title,
            title_en: request.title_en,
        }
    }
}
