use crate::api::extract::Json;
use crate::api::params::required;
use crate::api::{AffectedResponse, ErrorResponse};
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::models::NewRecipeIngredient;
use crate::schema::recipeingredients;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use diesel::upsert::excluded;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertIngredientsRequest {
    pub recipe_id: Option<i32>,
    /// `[itemId, amount]` pairs; amount is free text such as `"200g"`
    #[serde(default)]
    #[schema(value_type = Vec<Vec<Object>>)]
    pub ingredients: Vec<(i32, Value)>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveIngredientsRequest {
    pub recipe_id: Option<i32>,
    pub item_id: Option<Vec<i32>>,
}

/// Amounts arrive as strings or bare numbers; both are stored as text.
fn amount_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[utoipa::path(
    post,
    path = "/recipe/ingredients",
    tag = "recipes",
    request_body = UpsertIngredientsRequest,
    responses(
        (status = 200, description = "Ingredients stored", body = AffectedResponse),
        (status = 400, description = "recipeId or ingredients missing", body = ErrorResponse),
        (status = 409, description = "Unknown recipe or item", body = ErrorResponse)
    )
)]
pub async fn upsert_ingredients(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<UpsertIngredientsRequest>,
) -> ApiResult<impl IntoResponse> {
    let recipe_id = required(req.recipe_id, "recipeId")?;
    if req.ingredients.is_empty() {
        return Err(ApiError::bad_request("ingredients must not be empty"));
    }

    let rows: Vec<(i32, Option<String>)> = req
        .ingredients
        .iter()
        .map(|(item_id, amount)| (*item_id, amount_text(amount)))
        .collect();

    let mut conn = pool.get()?;

    let affected = conn.immediate_transaction(|conn| {
        let mut affected = 0;
        for (item_id, amount) in &rows {
            affected += diesel::insert_into(recipeingredients::table)
                .values(NewRecipeIngredient {
                    recipe_id,
                    item_id: *item_id,
                    amount: amount.as_deref(),
                })
                .on_conflict((recipeingredients::recipe_id, recipeingredients::item_id))
                .do_update()
                .set(recipeingredients::amount.eq(excluded(recipeingredients::amount)))
                .execute(conn)?;
        }
        Ok::<_, diesel::result::Error>(affected)
    })?;

    Ok(Json(AffectedResponse {
        message: "Ingredients saved".to_string(),
        affected,
    }))
}

#[utoipa::path(
    delete,
    path = "/recipe/ingredients",
    tag = "recipes",
    request_body = RemoveIngredientsRequest,
    responses(
        (status = 200, description = "Ingredients removed", body = AffectedResponse),
        (status = 400, description = "recipeId or itemId missing", body = ErrorResponse)
    )
)]
pub async fn remove_ingredients(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<RemoveIngredientsRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(recipe_id), Some(item_ids)) = (req.recipe_id, req.item_id) else {
        return Err(ApiError::bad_request("Missing recipeId or itemId"));
    };

    let mut conn = pool.get()?;

    let affected = diesel::delete(
        recipeingredients::table
            .filter(recipeingredients::recipe_id.eq(recipe_id))
            .filter(recipeingredients::item_id.eq_any(&item_ids)),
    )
    .execute(&mut conn)?;

    Ok(Json(AffectedResponse {
        message: "OK".to_string(),
        affected,
    }))
}
