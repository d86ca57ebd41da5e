use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_recipe, IngredientRow, RecipeDetail};
use crate::models::Recipe;
use crate::schema::{item, recipe, recipeingredients, users};
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetRecipeParams {
    #[serde(rename = "RecipeID")]
    pub recipe_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub data: RecipeDetail,
}

fn load_recipe(pool: &DbPool, params: GetRecipeParams) -> ApiResult<RecipeDetail> {
    let recipe_id = required(params.recipe_id, "RecipeID")?;

    let mut conn = pool.get()?;

    let (found, username): (Recipe, String) = recipe::table
        .inner_join(users::table)
        .filter(recipe::recipe_id.eq(recipe_id))
        .select((Recipe::as_select(), users::username))
        .first(&mut conn)
        .optional()?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;

    let ingredients: Vec<(i32, String, Option<Vec<u8>>, Option<String>)> = recipeingredients::table
        .inner_join(item::table)
        .filter(recipeingredients::recipe_id.eq(recipe_id))
        .select((
            item::item_id,
            item::item_name,
            item::item_img,
            recipeingredients::amount,
        ))
        .order(item::item_id.asc())
        .load(&mut conn)?;

    let ingredients = ingredients
        .into_iter()
        .map(|(item_id, item_name, item_img, amount)| IngredientRow {
            item_id,
            item_name,
            item_img,
            amount,
        })
        .collect();

    Ok(format_recipe(found, username, ingredients))
}

#[utoipa::path(
    get,
    path = "/recipe",
    tag = "recipes",
    params(GetRecipeParams),
    responses(
        (status = 200, description = "Recipe with its ingredients", body = RecipeResponse),
        (status = 400, description = "Missing RecipeID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<GetRecipeParams>,
) -> ApiResult<impl IntoResponse> {
    let data = load_recipe(&pool, params)?;
    Ok(Json(RecipeResponse { data }))
}

/// Same payload as `GET /recipe`; kept for clients built against the v2 path.
#[utoipa::path(
    get,
    path = "/v2/recipe",
    tag = "recipes",
    params(GetRecipeParams),
    responses(
        (status = 200, description = "Recipe with its ingredients", body = RecipeResponse),
        (status = 400, description = "Missing RecipeID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe_v2(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<GetRecipeParams>,
) -> ApiResult<impl IntoResponse> {
    let data = load_recipe(&pool, params)?;
    Ok(Json(RecipeResponse { data }))
}
