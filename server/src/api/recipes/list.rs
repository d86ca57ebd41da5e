use super::{summary_rows, RecipesResponse, SummaryTuple, RECIPES_PER_PAGE};
use crate::api::extract::{Json, Query};
use crate::api::params::{page_offset, required};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::format::format_recipes;
use crate::schema::{recipe, users};
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RecipePageParams {
    /// Only used by `/recipe/owner`
    pub user_id: Option<i32>,
    /// 1-based page number (default 1)
    pub page: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/recipe/all",
    tag = "recipes",
    params(RecipePageParams),
    responses(
        (status = 200, description = "One page of recipes", body = RecipesResponse)
    )
)]
pub async fn list_recipes(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<RecipePageParams>,
) -> ApiResult<impl IntoResponse> {
    let (_, offset) = page_offset(params.page, RECIPES_PER_PAGE);

    let mut conn = pool.get()?;

    let rows: Vec<SummaryTuple> = recipe::table
        .inner_join(users::table)
        .select((
            recipe::recipe_id,
            recipe::recipe_name,
            users::username,
            recipe::recipe_img,
        ))
        .order(recipe::recipe_id.asc())
        .limit(RECIPES_PER_PAGE)
        .offset(offset)
        .load(&mut conn)?;

    Ok(Json(RecipesResponse {
        data: format_recipes(summary_rows(rows)),
    }))
}

#[utoipa::path(
    get,
    path = "/recipe/owner",
    tag = "recipes",
    params(RecipePageParams),
    responses(
        (status = 200, description = "One page of the user's recipes", body = RecipesResponse),
        (status = 400, description = "Missing userId", body = ErrorResponse)
    )
)]
pub async fn list_owner_recipes(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<RecipePageParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(params.user_id, "userId")?;
    let (_, offset) = page_offset(params.page, RECIPES_PER_PAGE);

    let mut conn = pool.get()?;

    let rows: Vec<SummaryTuple> = recipe::table
        .inner_join(users::table)
        .filter(recipe::user_id.eq(user_id))
        .select((
            recipe::recipe_id,
            recipe::recipe_name,
            users::username,
            recipe::recipe_img,
        ))
        .order(recipe::recipe_id.asc())
        .limit(RECIPES_PER_PAGE)
        .offset(offset)
        .load(&mut conn)?;

    Ok(Json(RecipesResponse {
        data: format_recipes(summary_rows(rows)),
    }))
}
