pub mod daily_lists;
pub mod dish_plans;
pub mod extract;
pub mod fridge;
pub mod group_lists;
pub mod groups;
pub mod items;
pub mod multipart;
pub mod params;
pub mod recipes;
pub mod users;

use crate::AppState;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Returned when a membership change names users that don't exist
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissingMembersResponse {
    pub error: String,
    pub missing_members: Vec<i32>,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement carrying the number of rows touched
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AffectedResponse {
    pub message: String,
    pub affected: usize,
}

/// All API routes; paths are absolute so each module router is merged, not nested
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(items::router())
        .merge(fridge::router())
        .merge(daily_lists::router())
        .merge(recipes::router())
        .merge(dish_plans::router())
        .merge(groups::router())
        .merge(group_lists::router())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(components(schemas(
        ErrorResponse,
        MissingMembersResponse,
        MessageResponse,
        AffectedResponse
    )))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        users::ApiDoc::openapi(),
        items::ApiDoc::openapi(),
        fridge::ApiDoc::openapi(),
        daily_lists::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        dish_plans::ApiDoc::openapi(),
        groups::ApiDoc::openapi(),
        group_lists::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
