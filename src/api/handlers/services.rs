//! Public service listing and lookup.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::SERVICE_TAG;
use crate::api::dto::{ErrorResponse, ListQuery, ServiceListResponse, ServiceResponse};
use crate::api::handlers::parse_path_id;
use crate::cache::CacheManager;
use crate::error::{AppError, AppResult};
use crate::services::UseCaseError;
use crate::state::AppState;
use crate::utils::{AppPath, Language, PageRequest};

/// Lifetime of a cached listing page.
pub const LISTING_CACHE_TTL_SECONDS: u64 = 300;

pub fn service_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_services))
        .routes(routes!(get_service))
}

/// Every input that shapes a listing page is part of its key.
pub(crate) fn listing_cache_key(
    language: Language,
    sub_sub_category_id: Option<Uuid>,
    page: PageRequest,
) -> String {
    let filter = sub_sub_category_id.map_or_else(|| "all".to_string(), |id| id.to_string());
    format!(
        "services:{}:{}:{}:{}",
        language, filter, page.page, page.per_page
    )
}

/// Cache failures degrade to a miss.
pub(crate) async fn cached_listing(cache: &CacheManager, key: &str) -> Option<ServiceListResponse> {
    match cache.get_json::<ServiceListResponse>(key).await {
        Ok(hit) => hit,
        Err(e) => {
            tracing::warn!(error = %e, key = %key, "Listing cache read failed");
            None
        }
    }
}

pub(crate) async fn store_listing(cache: &CacheManager, key: &str, listing: &ServiceListResponse) {
    if let Err(e) = cache
        .set_json(key, listing, Some(LISTING_CACHE_TTL_SECONDS))
        .await
    {
        tracing::warn!(error = %e, key = %key, "Listing cache write failed");
    }
}

/// GET /services - Page through every service, newest first
#[utoipa::path(
    get,
    path = "/services",
    tag = SERVICE_TAG,
    params(
        ListQuery,
        ("accept-language" = Option<String>, Header, description = "`en` for English titles, anything else for Portuguese")
    ),
    responses(
        (status = 200, description = "One page of services", body = ServiceListResponse),
        (status = 400, description = "The listing could not be produced", body = ErrorResponse)
    )
)]
async fn list_services(
    State(state): State<AppState>,
    language: Language,
    query: ListQuery,
) -> AppResult<Json<ServiceListResponse>> {
    let page = query.page_request();
    let key = listing_cache_key(language, None, page);
    if let Some(hit) = cached_listing(&state.cache, &key).await {
        return Ok(Json(hit));
    }

    let services = state
        .services
        .catalog
        .fetch_services(None, page)
        .await
        .map_err(|e| match e {
            UseCaseError::Infrastructure(inner) => inner,
            _ => AppError::BadRequest {
                message: "Bad Request".to_string(),
            },
        })?;

    let response = ServiceListResponse::present(services, language);
    store_listing(&state.cache, &key, &response).await;
    Ok(Json(response))
}

/// GET /services/{id} - Get a single service
#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = SERVICE_TAG,
    params(
        ("id" = String, Path, description = "Service ID (UUID)")
    ),
    responses(
        (status = 200, description = "Service found", body = ServiceResponse),
        (status = 400, description = "Path could not be decoded", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    )
)]
async fn get_service(
    State(state): State<AppState>,
    language: Language,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<ServiceResponse>> {
    let service_id = parse_path_id("service", &id)?;
    let service = state.services.catalog.get_service(service_id).await?;
    Ok(Json(ServiceResponse::present(&service, language)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{body_json, get, send};
    use crate::api::routes::create_router;
    use crate::state::tests::test_state;
    use axum::http::{Request, StatusCode, header};
    use axum::body::Body;

    #[test]
    fn test_cache_key_covers_every_input() {
        let page = PageRequest { page: 2, per_page: 10 };
        let id = Uuid::new_v4();
        let keys = [
            listing_cache_key(Language::Pt, None, page),
            listing_cache_key(Language::En, None, page),
            listing_cache_key(Language::Pt, Some(id), page),
            listing_cache_key(Language::Pt, None, PageRequest { page: 3, per_page: 10 }),
            listing_cache_key(Language::Pt, None, PageRequest { page: 2, per_page: 20 }),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert_eq!(keys[0], "services:pt:all:2:10");
    }

    #[tokio::test]
    async fn test_list_services_returns_data_and_meta() {
        let (state, store) = test_state();
        let chain = store.add_chain();
        for n in 0..25 {
            store.add_service(&format!("Serviço {n}"), &format!("Service {n}"), chain.sub_sub_category);
        }
        let app = create_router(state);

        let response = send(&app, get("/services?page=3&per_page=10")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 5);
        assert_eq!(json["data"][0]["title"], "Serviço 4");
        assert_eq!(
            json["meta"],
            serde_json::json!({
                "total": 25,
                "last_page": 3,
                "current_page": 3,
                "per_page": 10,
                "prev": 2,
                "next": null
            })
        );
    }

    #[tokio::test]
    async fn test_list_services_localizes_titles() {
        let (state, store) = test_state();
        let chain = store.add_chain();
        store.add_service("Pintura", "Painting", chain.sub_sub_category);
        let app = create_router(state);

        let request = Request::builder()
            .uri("/services")
            .header(header::ACCEPT_LANGUAGE, "en")
            .body(Body::empty())
            .unwrap();
        let json = body_json(send(&app, request).await).await;
        assert_eq!(json["data"][0]["title"], "Painting");

        let request = Request::builder()
            .uri("/services")
            .header(header::ACCEPT_LANGUAGE, "en-US")
            .body(Body::empty())
            .unwrap();
        let json = body_json(send(&app, request).await).await;
        assert_eq!(json["data"][0]["title"], "Pintura");
    }

    #[tokio::test]
    async fn test_lenient_paging_parameters() {
        let (state, store) = test_state();
        let chain = store.add_chain();
        store.add_service("Pintura", "Painting", chain.sub_sub_category);
        let app = create_router(state);

        let json = body_json(send(&app, get("/services?page=abc&per_page=xyz")).await).await;
        assert_eq!(json["meta"]["current_page"], 1);
        assert_eq!(json["meta"]["per_page"], 10);

        let json = body_json(send(&app, get("/services?per_page=1000")).await).await;
        assert_eq!(json["meta"]["per_page"], 100);
    }

    #[tokio::test]
    async fn test_repeated_paging_parameter_uses_default() {
        let (state, store) = test_state();
        let chain = store.add_chain();
        store.add_service("Pintura", "Painting", chain.sub_sub_category);
        let app = create_router(state);

        let response = send(&app, get("/services?page=1&page=2&per_page=5")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["meta"]["current_page"], 1);
        assert_eq!(json["meta"]["per_page"], 5);
    }

    #[tokio::test]
    async fn test_undecodable_path_is_json_bad_request() {
        let (state, _store) = test_state();
        let app = create_router(state);

        let response = send(&app, get("/services/%FF")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_listing_is_served_from_cache() {
        let (state, store) = test_state();
        let chain = store.add_chain();
        store.add_service("Pintura", "Painting", chain.sub_sub_category);
        let app = create_router(state);

        let first = body_json(send(&app, get("/services")).await).await;
        store.add_service("Elétrica", "Electrical", chain.sub_sub_category);
        let second = body_json(send(&app, get("/services")).await).await;
        assert_eq!(first, second);

        let other_page = body_json(send(&app, get("/services?per_page=5")).await).await;
        assert_eq!(other_page["meta"]["total"], 2);
    }

    #[tokio::test]
    async fn test_get_service() {
        let (state, store) = test_state();
        let chain = store.add_chain();
        let service = store.add_service("Pintura", "Painting", chain.sub_sub_category);
        let app = create_router(state);

        let response = send(&app, get(&format!("/services/{}", service.id))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["id"], service.id.to_string());
        assert_eq!(json["sub_sub_category_id"], chain.sub_sub_category.to_string());

        let missing = send(&app, get(&format!("/services/{}", Uuid::new_v4()))).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let malformed = send(&app, get("/services/not-a-uuid")).await;
        assert_eq!(malformed.status(), StatusCode::NOT_FOUND);
    }
}
