use crate::api::extract::Json;
use crate::api::params::{required, OneOrMany};
use crate::api::{AffectedResponse, ErrorResponse};
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::schema::dishplan;
use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDayRequest {
    pub user_id: Option<i32>,
    #[serde(default, deserialize_with = "crate::api::params::lenient_date::deserialize")]
    #[schema(value_type = String, format = Date)]
    pub date_to_do: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecipesRequest {
    pub user_id: Option<i32>,
    #[serde(default, deserialize_with = "crate::api::params::lenient_date::deserialize")]
    #[schema(value_type = String, format = Date)]
    pub date_to_do: Option<NaiveDate>,
    /// One recipe id or a list of them
    pub recipe_id: Option<OneOrMany>,
}

#[utoipa::path(
    delete,
    path = "/dish-plan",
    tag = "dish_plans",
    request_body = DeleteDayRequest,
    responses(
        (status = 200, description = "Every plan of that day removed", body = AffectedResponse),
        (status = 400, description = "Missing field", body = ErrorResponse)
    )
)]
pub async fn delete_day(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<DeleteDayRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(req.user_id, "userId")?;
    let date_to_do = required(req.date_to_do, "dateToDo")?;

    let mut conn = pool.get()?;

    let affected = diesel::delete(
        dishplan::table
            .filter(dishplan::user_id.eq(user_id))
            .filter(dishplan::date_to_do.eq(date_to_do)),
    )
    .execute(&mut conn)?;

    Ok(Json(AffectedResponse {
        message: "Dish plan removed".to_string(),
        affected,
    }))
}

#[utoipa::path(
    delete,
    path = "/dish-plan/recipe",
    tag = "dish_plans",
    request_body = DeleteRecipesRequest,
    responses(
        (status = 200, description = "Named recipes removed from the day", body = AffectedResponse),
        (status = 400, description = "Missing field", body = ErrorResponse)
    )
)]
pub async fn delete_recipes_from_day(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<DeleteRecipesRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(req.user_id, "userId")?;
    let date_to_do = required(req.date_to_do, "dateToDo")?;
    let recipe_ids = required(req.recipe_id, "recipeId")?.into_vec();

    let mut conn = pool.get()?;

    let affected = diesel::delete(
        dishplan::table
            .filter(dishplan::user_id.eq(user_id))
            .filter(dishplan::date_to_do.eq(date_to_do))
            .filter(dishplan::recipe_id.eq_any(&recipe_ids)),
    )
    .execute(&mut conn)?;

    Ok(Json(AffectedResponse {
        message: "Recipes removed from dish plan".to_string(),
        affected,
    }))
}
