//! Service listings scoped to one level of the category tree.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{ErrorResponse, ListQuery, ServiceListResponse};
use crate::api::handlers::parse_path_id;
use crate::api::handlers::services::{cached_listing, listing_cache_key, store_listing};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::{AppPath, Language};

pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_by_category))
        .routes(routes!(list_by_sub_category))
        .routes(routes!(list_by_sub_sub_category))
}

/// GET /categories/{category_id}/services
#[utoipa::path(
    get,
    path = "/categories/{category_id}/services",
    tag = CATEGORY_TAG,
    params(
        ("category_id" = String, Path, description = "Category ID (UUID)"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Services under the category", body = ServiceListResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn list_by_category(
    State(state): State<AppState>,
    language: Language,
    AppPath(category_id): AppPath<String>,
    query: ListQuery,
) -> AppResult<Json<ServiceListResponse>> {
    let category_id = parse_path_id("category", &category_id)?;
    let services = state
        .services
        .catalog
        .fetch_by_category(category_id, query.page_request())
        .await?;
    Ok(Json(ServiceListResponse::present(services, language)))
}

/// GET /sub-categories/{sub_category_id}/services
#[utoipa::path(
    get,
    path = "/sub-categories/{sub_category_id}/services",
    tag = CATEGORY_TAG,
    params(
        ("sub_category_id" = String, Path, description = "Sub-category ID (UUID)"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Services under the sub-category", body = ServiceListResponse),
        (status = 404, description = "Sub-category not found", body = ErrorResponse)
    )
)]
async fn list_by_sub_category(
    State(state): State<AppState>,
    language: Language,
    AppPath(sub_category_id): AppPath<String>,
    query: ListQuery,
) -> AppResult<Json<ServiceListResponse>> {
    let sub_category_id = parse_path_id("sub_category", &sub_category_id)?;
    let services = state
        .services
        .catalog
        .fetch_by_sub_category(sub_category_id, query.page_request())
        .await?;
    Ok(Json(ServiceListResponse::present(services, language)))
}

/// GET /sub-sub-categories/{sub_sub_category_id}/services
///
/// Shares the cached listing path with `GET /services`, with the filter set.
#[utoipa::path(
    get,
    path = "/sub-sub-categories/{sub_sub_category_id}/services",
    tag = CATEGORY_TAG,
    params(
        ("sub_sub_category_id" = String, Path, description = "Sub-sub-category ID (UUID)"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Services under the sub-sub-category", body = ServiceListResponse),
        (status = 404, description = "Sub-sub-category not found", body = ErrorResponse)
    )
)]
async fn list_by_sub_sub_category(
    State(state): State<AppState>,
    language: Language,
    AppPath(sub_sub_category_id): AppPath<String>,
    query: ListQuery,
) -> AppResult<Json<ServiceListResponse>> {
    let sub_sub_category_id = parse_path_id("sub_sub_category", &sub_sub_category_id)?;
    let page = query.page_request();
    let key = listing_cache_key(language, Some(sub_sub_category_id), page);
    if let Some(hit) = cached_listing(&state.cache, &key).await {
        return Ok(Json(hit));
    }

    let services = state
        .services
        .catalog
        .fetch_by_sub_sub_category(sub_sub_category_id, page)
        .await?;

    let response = ServiceListResponse::present(services, language);
    store_listing(&state.cache, &key, &response).await;
    Ok(Json(response))
}
