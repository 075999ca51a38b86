//! Service administration. Mounted behind the auth middleware.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ADMIN_TAG;
use crate::api::dto::{CreateServiceRequest, ErrorResponse, ServiceResponse, UpdateServiceRequest};
use crate::api::handlers::parse_path_id;
use crate::api::middleware::AuthUser;
use crate::cache::CacheManager;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::{AppPath, Language};
use crate::utils::validate::ValidatedJson;

pub fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_service))
        .routes(routes!(update_service))
}

/// Cached listings may now be stale.
async fn invalidate_listings(cache: &CacheManager) {
    if let Err(e) = cache.clear().await {
        tracing::warn!(error = %e, "Failed to clear listing cache");
    }
}

/// POST /admin/services - Create a service
#[utoipa::path(
    post,
    path = "/admin/services",
    tag = ADMIN_TAG,
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Sub-sub-category not found", body = ErrorResponse),
        (status = 409, description = "Title already in use", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn create_service(
    State(state): State<AppState>,
    user: AuthUser,
    language: Language,
    ValidatedJson(request): ValidatedJson<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ServiceResponse>)> {
    let service = state
        .services
        .catalog
        .create_service(request.into())
        .await?;
    invalidate_listings(&state.cache).await;

    tracing::info!(service_id = %service.id, user_id = %user.user_id, "Service created");
    Ok((
        StatusCode::CREATED,
        Json(ServiceResponse::present(&service, language)),
    ))
}

/// PUT /admin/services/{id} - Update a service's titles
#[utoipa::path(
    put,
    path = "/admin/services/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = String, Path, description = "Service ID (UUID)")
    ),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ServiceResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 409, description = "Title already in use", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_service(
    State(state): State<AppState>,
    user: AuthUser,
    language: Language,
    AppPath(id): AppPath<String>,
    ValidatedJson(request): ValidatedJson<UpdateServiceRequest>,
) -> AppResult<Json<ServiceResponse>> {
    let service_id = parse_path_id("service", &id)?;
    let service = state
        .services
        .catalog
        .update_service(service_id, request.into())
        .await?;
    invalidate_listings(&state.cache).await;

    tracing::info!(service_id = %service.id, user_id = %user.user_id, "Service updated");
    Ok(Json(ServiceResponse::present(&service, language)))
}
