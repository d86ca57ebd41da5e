use crate::api::multipart::FormData;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::models::NewRecipe;
use crate::schema::recipe;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Multipart form layout for `POST /recipe`
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct CreateRecipeRequest {
    pub user_id: i32,
    pub recipe_name: String,
    pub instructions: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub recipe_img: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeResponse {
    pub recipe_id: i32,
}

#[utoipa::path(
    post,
    path = "/recipe",
    tag = "recipes",
    request_body(content_type = "multipart/form-data", content = CreateRecipeRequest),
    responses(
        (status = 201, description = "Recipe created", body = CreateRecipeResponse),
        (status = 400, description = "userId or recipeName missing", body = ErrorResponse),
        (status = 409, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(pool): State<Arc<DbPool>>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;

    let (Some(user_id), Some(recipe_name)) = (form.id("userId")?, form.text("recipeName")) else {
        return Err(ApiError::bad_request("userId and recipeName are required"));
    };

    let mut conn = pool.get()?;

    let recipe_id: i32 = diesel::insert_into(recipe::table)
        .values(NewRecipe {
            user_id,
            recipe_name,
            instructions: form.text("instructions").unwrap_or_default(),
            recipe_img: form.file("recipeImg"),
        })
        .returning(recipe::recipe_id)
        .get_result(&mut conn)?;

    tracing::info!(recipe_id, user_id, "recipe created");

    Ok((StatusCode::CREATED, Json(CreateRecipeResponse { recipe_id })))
}
