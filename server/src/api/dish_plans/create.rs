use crate::api::extract::Json;
use crate::api::params::required;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::models::NewDishPlan;
use crate::schema::dishplan;
use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDishPlanRequest {
    pub user_id: Option<i32>,
    #[serde(default, deserialize_with = "crate::api::params::lenient_date::deserialize")]
    #[schema(value_type = String, format = Date)]
    pub date_to_do: Option<NaiveDate>,
    pub recipe_id: Option<i32>,
}

/// `data` is 1 for a new plan, 0 when it already existed
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateDishPlanResponse {
    pub data: usize,
}

#[utoipa::path(
    post,
    path = "/dish-plan",
    tag = "dish_plans",
    request_body = CreateDishPlanRequest,
    responses(
        (status = 200, description = "Plan stored", body = CreateDishPlanResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 409, description = "Unknown user or recipe", body = ErrorResponse)
    )
)]
pub async fn create_dish_plan(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateDishPlanRequest>,
) -> ApiResult<impl IntoResponse> {
    let plan = NewDishPlan {
        user_id: required(req.user_id, "userId")?,
        recipe_id: required(req.recipe_id, "recipeId")?,
        date_to_do: required(req.date_to_do, "dateToDo")?,
    };

    let mut conn = pool.get()?;

    let inserted = diesel::insert_into(dishplan::table)
        .values(&plan)
        .on_conflict_do_nothing()
        .execute(&mut conn)?;

    Ok(Json(CreateDishPlanResponse { data: inserted }))
}
