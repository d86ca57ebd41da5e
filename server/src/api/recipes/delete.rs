use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::{ErrorResponse, MessageResponse};
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::schema::{recipe, recipeingredients};
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecipeParams {
    pub recipe_id: Option<i32>,
}

#[utoipa::path(
    delete,
    path = "/recipe",
    tag = "recipes",
    params(DeleteRecipeParams),
    responses(
        (status = 200, description = "Recipe and its ingredients deleted", body = MessageResponse),
        (status = 400, description = "Missing recipeId", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Recipe is still planned; nothing was deleted", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<DeleteRecipeParams>,
) -> ApiResult<impl IntoResponse> {
    let recipe_id = required(params.recipe_id, "recipeId")?;

    let mut conn = pool.get()?;

    // Both deletes commit together or not at all.
    let deleted = conn.immediate_transaction(|conn| {
        diesel::delete(recipeingredients::table.filter(recipeingredients::recipe_id.eq(recipe_id)))
            .execute(conn)?;
        diesel::delete(recipe::table.find(recipe_id)).execute(conn)
    });

    let deleted = match deleted {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(recipe_id, "recipe delete rolled back: {}", e);
            return Err(e.into());
        }
    };

    if deleted == 0 {
        return Err(ApiError::not_found("Recipe not found"));
    }

    tracing::info!(recipe_id, "recipe deleted");

    Ok(Json(MessageResponse::new("Recipe deleted successfully")))
}
