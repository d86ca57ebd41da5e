use super::{summary_rows, RecipesResponse, SummaryTuple};
use crate::api::extract::Json;
use crate::api::params::{contains_pattern, keywords};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_recipes, RecipeSummaryRow};
use crate::schema::{recipe, recipeingredients, users};
use axum::{extract::State, response::IntoResponse};
use diesel::dsl::count;
use diesel::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

/// The first non-empty criterion wins: name, then ingredients, then owners.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecipesRequest {
    pub name: Option<String>,
    pub ingredient_ids: Option<Vec<i32>>,
    pub owner_ids: Option<Vec<i32>>,
}

/// Orders recipes by matched ingredient count, highest first, ties by id.
fn rank_by_matches(
    rows: Vec<RecipeSummaryRow>,
    matches: &HashMap<i32, i64>,
) -> Vec<RecipeSummaryRow> {
    let mut ranked: Vec<RecipeSummaryRow> = rows
        .into_iter()
        .map(|mut row| {
            row.matched_ingredients = matches.get(&row.recipe_id).copied();
            row
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.matched_ingredients
            .cmp(&a.matched_ingredients)
            .then(a.recipe_id.cmp(&b.recipe_id))
    });
    ranked
}

#[utoipa::path(
    post,
    path = "/search/recipe",
    tag = "recipes",
    request_body = SearchRecipesRequest,
    responses(
        (status = 200, description = "Matching recipes", body = RecipesResponse),
        (status = 400, description = "No search criterion given", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<SearchRecipesRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = req.name.unwrap_or_default();
    let words = keywords(&name);
    let ingredient_ids = req.ingredient_ids.unwrap_or_default();
    let owner_ids = req.owner_ids.unwrap_or_default();

    if words.is_empty() && ingredient_ids.is_empty() && owner_ids.is_empty() {
        return Err(ApiError::bad_request(
            "Recipe name, ingredients, or owner ID required",
        ));
    }

    let mut conn = pool.get()?;

    let mut query = recipe::table
        .inner_join(users::table)
        .select((
            recipe::recipe_id,
            recipe::recipe_name,
            users::username,
            recipe::recipe_img,
        ))
        .order(recipe::recipe_id.asc())
        .into_boxed();

    let rows = if !words.is_empty() {
        for word in words {
            query = query.filter(recipe::recipe_name.like(contains_pattern(word)).escape('\\'));
        }
        let rows: Vec<SummaryTuple> = query.load(&mut conn)?;
        summary_rows(rows)
    } else if !ingredient_ids.is_empty() {
        let counts: Vec<(i32, i64)> = recipeingredients::table
            .filter(recipeingredients::item_id.eq_any(&ingredient_ids))
            .group_by(recipeingredients::recipe_id)
            .select((recipeingredients::recipe_id, count(recipeingredients::item_id)))
            .load(&mut conn)?;
        let matches: HashMap<i32, i64> = counts.into_iter().collect();

        let rows: Vec<SummaryTuple> = query
            .filter(recipe::recipe_id.eq_any(matches.keys().copied().collect::<Vec<_>>()))
            .load(&mut conn)?;
        rank_by_matches(summary_rows(rows), &matches)
    } else {
        let rows: Vec<SummaryTuple> = query
            .filter(recipe::user_id.eq_any(&owner_ids))
            .load(&mut conn)?;
        summary_rows(rows)
    };

    Ok(Json(RecipesResponse {
        data: format_recipes(rows),
    }))
}
