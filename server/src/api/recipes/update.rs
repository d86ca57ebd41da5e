use crate::api::multipart::FormData;
use crate::api::{ErrorResponse, MessageResponse};
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::models::RecipeChanges;
use crate::schema::recipe;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Multipart form layout for `POST /recipe/update`; absent parts keep their value
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UpdateRecipeRequest {
    pub recipe_id: i32,
    pub instructions: Option<String>,
    pub name: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub img: Option<Vec<u8>>,
}

#[utoipa::path(
    post,
    path = "/recipe/update",
    tag = "recipes",
    request_body(content_type = "multipart/form-data", content = UpdateRecipeRequest),
    responses(
        (status = 200, description = "Recipe updated", body = MessageResponse),
        (status = 400, description = "recipeId missing or nothing to update", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(pool): State<Arc<DbPool>>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;

    let Some(recipe_id) = form.id("recipeId")? else {
        return Err(ApiError::bad_request("recipeId is required"));
    };

    let changes = RecipeChanges {
        recipe_name: form.text("name"),
        instructions: form.text("instructions"),
        recipe_img: form.file("img"),
    };

    if changes.recipe_name.is_none()
        && changes.instructions.is_none()
        && changes.recipe_img.is_none()
    {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let mut conn = pool.get()?;

    let updated = diesel::update(recipe::table.find(recipe_id))
        .set(&changes)
        .execute(&mut conn)?;

    if updated == 0 {
        return Err(ApiError::not_found("Recipe not found"));
    }

    Ok(Json(MessageResponse::new("Update successful")))
}
