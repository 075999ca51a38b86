//! Task routing. Mounted behind the auth middleware.

use axum::{extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::TASK_TAG;
use crate::api::dto::{ErrorResponse, UpdateTaskSubSubCategoryRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::services::UpdateTaskSubSubCategory;
use crate::state::AppState;
use crate::utils::{AppPath, Language};
use crate::utils::validate::ValidatedJson;

pub fn task_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(update_task_sub_sub_category))
}

/// POST /tasks/{task_id}/sub-sub-category - Route a task to a sub-sub-category
///
/// Only the task's owner may do this. The response has no body.
#[utoipa::path(
    post,
    path = "/tasks/{task_id}/sub-sub-category",
    tag = TASK_TAG,
    params(
        ("task_id" = String, Path, description = "Task ID (UUID)"),
        ("accept-language" = Option<String>, Header, description = "`en` for English messages")
    ),
    request_body = UpdateTaskSubSubCategoryRequest,
    responses(
        (status = 200, description = "Task updated"),
        (status = 400, description = "Invalid body, or the caller does not own the task", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Task or sub-sub-category not found", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_task_sub_sub_category(
    State(state): State<AppState>,
    user: AuthUser,
    language: Language,
    AppPath(task_id): AppPath<String>,
    ValidatedJson(request): ValidatedJson<UpdateTaskSubSubCategoryRequest>,
) -> AppResult<StatusCode> {
    let sub_sub_category_id = request.into_id()?;
    state
        .services
        .tasks
        .update_sub_sub_category(UpdateTaskSubSubCategory {
            task_id,
            user_id: user.user_id,
            sub_sub_category_id,
            language,
        })
        .await?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use crate::api::handlers::test_support::{bearer, body_bytes, body_json, json, send};
    use crate::api::routes::create_router;
    use crate::state::tests::test_state;
    use axum::http::{Method, StatusCode, header};
    use uuid::Uuid;

    fn body_for(target: impl std::fmt::Display) -> String {
        format!(r#"{{"sub_sub_category_id":"{target}"}}"#)
    }

    #[tokio::test]
    async fn test_owner_updates_task() {
        let (state, store) = test_state();
        let chain = store.add_chain();
        let owner = Uuid::new_v4();
        let task = store.add_task(owner);
        let app = create_router(state);

        let response = send(
            &app,
            json(
                Method::POST,
                &format!("/tasks/{}/sub-sub-category", task.id),
                Some(&bearer(owner)),
                &body_for(chain.sub_sub_category),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
        assert_eq!(
            store.task(task.id).unwrap().sub_sub_category_id,
            Some(chain.sub_sub_category)
        );
    }

    #[tokio::test]
    async fn test_non_string_body_is_field_error() {
        let (state, store) = test_state();
        let owner = Uuid::new_v4();
        let task = store.add_task(owner);
        let app = create_router(state);

        for body in [r#"{}"#, r#"{"sub_sub_category_id":7}"#] {
            let response = send(
                &app,
                json(
                    Method::POST,
                    &format!("/tasks/{}/sub-sub-category", task.id),
                    Some(&bearer(owner)),
                    body,
                ),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json = body_json(response).await;
            assert_eq!(json["details"]["errors"][0]["field"], "sub_sub_category_id");
            assert_eq!(
                json["details"]["errors"][0]["message"],
                "task.service_id.invalid_type_error"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_task_is_not_found() {
        let (state, store) = test_state();
        let chain = store.add_chain();
        let app = create_router(state);
        let auth = bearer(Uuid::new_v4());

        for task_id in [Uuid::new_v4().to_string(), "abc".to_string()] {
            let response = send(
                &app,
                json(
                    Method::POST,
                    &format!("/tasks/{task_id}/sub-sub-category"),
                    Some(&auth),
                    &body_for(chain.sub_sub_category),
                ),
            )
            .await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{task_id}");
        }
    }

    #[tokio::test]
    async fn test_foreign_task_is_bad_request_with_localized_message() {
        let (state, store) = test_state();
        let chain = store.add_chain();
        let task = store.add_task(Uuid::new_v4());
        let app = create_router(state);

        let mut request = json(
            Method::POST,
            &format!("/tasks/{}/sub-sub-category", task.id),
            Some(&bearer(Uuid::new_v4())),
            &body_for(chain.sub_sub_category),
        );
        request
            .headers_mut()
            .insert(header::ACCEPT_LANGUAGE, "en".parse().unwrap());

        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "You are not allowed to change this task."
        );
        assert_eq!(store.task(task.id).unwrap().sub_sub_category_id, None);
    }

    #[tokio::test]
    async fn test_unknown_target_is_not_found() {
        let (state, store) = test_state();
        let owner = Uuid::new_v4();
        let task = store.add_task(owner);
        let app = create_router(state);

        let response = send(
            &app,
            json(
                Method::POST,
                &format!("/tasks/{}/sub-sub-category", task.id),
                Some(&bearer(owner)),
                &body_for(Uuid::new_v4()),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_requires_bearer_token() {
        let (state, store) = test_state();
        let task = store.add_task(Uuid::new_v4());
        let app = create_router(state);

        let response = send(
            &app,
            json(
                Method::POST,
                &format!("/tasks/{}/sub-sub-category", task.id),
                None,
                &body_for(Uuid::new_v4()),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
