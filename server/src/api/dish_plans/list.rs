use crate::api::extract::{Json, Query};
use crate::api::params::{required, required_month};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::format::encode_image;
use crate::schema::{dishplan, recipe};
use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PlanMonthParams {
    pub user_id: Option<i32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PlanDayParams {
    pub user_id: Option<i32>,
    #[param(value_type = Option<String>, format = Date)]
    pub date_to_do: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct PlanDate {
    pub date_to_do: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlanDatesResponse {
    pub data: Vec<PlanDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct PlannedRecipe {
    #[serde(rename = "RecipeID")]
    pub recipe_id: i32,
    pub recipe_name: String,
    pub recipe_img: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlannedRecipesResponse {
    pub data: Vec<PlannedRecipe>,
}

#[utoipa::path(
    get,
    path = "/dish-plan",
    tag = "dish_plans",
    params(PlanMonthParams),
    responses(
        (status = 200, description = "Days of the month with at least one planned dish", body = PlanDatesResponse),
        (status = 400, description = "Missing or invalid parameter", body = ErrorResponse)
    )
)]
pub async fn list_plan_dates(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<PlanMonthParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(params.user_id, "userId")?;
    let (start, end) = required_month(params.year, params.month)?;

    let mut conn = pool.get()?;

    let dates: Vec<NaiveDate> = dishplan::table
        .filter(dishplan::user_id.eq(user_id))
        .filter(dishplan::date_to_do.ge(start))
        .filter(dishplan::date_to_do.lt(end))
        .select(dishplan::date_to_do)
        .distinct()
        .order(dishplan::date_to_do.asc())
        .load(&mut conn)?;

    Ok(Json(PlanDatesResponse {
        data: dates
            .into_iter()
            .map(|date_to_do| PlanDate { date_to_do })
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/dish-plan/date",
    tag = "dish_plans",
    params(PlanDayParams),
    responses(
        (status = 200, description = "Recipes planned for the day", body = PlannedRecipesResponse),
        (status = 400, description = "Missing parameter", body = ErrorResponse)
    )
)]
pub async fn list_day_recipes(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<PlanDayParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(params.user_id, "userId")?;
    let date_to_do = required(params.date_to_do, "dateToDo")?;

    let mut conn = pool.get()?;

    let rows: Vec<(i32, String, Option<Vec<u8>>)> = dishplan::table
        .inner_join(recipe::table)
        .filter(dishplan::user_id.eq(user_id))
        .filter(dishplan::date_to_do.eq(date_to_do))
        .select((recipe::recipe_id, recipe::recipe_name, recipe::recipe_img))
        .order(recipe::recipe_id.asc())
        .load(&mut conn)?;

    let data = rows
        .into_iter()
        .map(|(recipe_id, recipe_name, recipe_img)| PlannedRecipe {
            recipe_id,
            recipe_name,
            recipe_img: encode_image(recipe_img.as_deref()),
        })
        .collect();

    Ok(Json(PlannedRecipesResponse { data }))
}
