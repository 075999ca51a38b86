use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const SERVICE_TAG: &str = "Services";
pub const CATEGORY_TAG: &str = "Categories";
pub const TASK_TAG: &str = "Tasks";
pub const ADMIN_TAG: &str = "Admin";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace",
        description = "Service marketplace API: catalog browsing, service administration and task routing",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::error::ValidationFieldError,
            crate::utils::Language,
        )
    ),
    tags(
        (name = SERVICE_TAG, description = "Service listing and lookup"),
        (name = CATEGORY_TAG, description = "Services grouped by category level"),
        (name = TASK_TAG, description = "Task routing endpoints"),
        (name = ADMIN_TAG, description = "Service administration"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer Token Authentication"))
                        .build(),
                ),
            )
        }
    }
}
