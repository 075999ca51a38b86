//! Router configuration for the API.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{auth_middleware, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the application router with all routes, docs and middleware.
///
/// # Middleware Order
/// Layers run outermost first: compression, CORS, request id, logging.
/// Task and admin routes additionally pass through the bearer-token check.
///
/// # Routes
/// - `/services`, `/services/{id}` - Public listing and lookup
/// - `/categories/...`, `/sub-categories/...`, `/sub-sub-categories/...` - Scoped listings
/// - `/tasks/{task_id}/sub-sub-category` - Task routing (auth)
/// - `/admin/services` - Service administration (auth)
/// - `/health`, `/health/ready`, `/health/live` - Health checks
/// - `/swagger-ui`, `/api-docs/openapi.json` - API documentation
pub fn create_router(state: AppState) -> Router {
    let protected = OpenApiRouter::new()
        .merge(handlers::tasks::task_routes())
        .merge(handlers::admin::admin_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::health::health_routes())
        .merge(handlers::services::service_routes())
        .merge(handlers::categories::category_routes())
        .merge(protected)
        .split_for_parts();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        // Last added runs first: request_id must see the request before logging does
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{body_json, get, send};
    use crate::state::tests::test_state;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_openapi_document_lists_every_route() {
        let (state, _) = test_state();
        let app = create_router(state);

        let response = send(&app, get("/api-docs/openapi.json")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let paths = json["paths"].as_object().unwrap();
        for path in [
            "/services",
            "/services/{id}",
            "/categories/{category_id}/services",
            "/sub-categories/{sub_category_id}/services",
            "/sub-sub-categories/{sub_sub_category_id}/services",
            "/tasks/{task_id}/sub-sub-category",
            "/admin/services",
            "/admin/services/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[tokio::test]
    async fn test_every_response_has_request_id() {
        let (state, _) = test_state();
        let app = create_router(state);

        let ok = send(&app, get("/health/live")).await;
        assert!(ok.headers().contains_key("x-request-id"));

        let unknown = send(&app, get("/does-not-exist")).await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert!(unknown.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_public_routes_do_not_require_auth() {
        let (state, _) = test_state();
        let app = create_router(state);

        let response = send(&app, get("/services")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
