use crate::api::extract::{Json, Query};
use crate::api::params::{required, required_month};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::format::{format_month_plans, MonthPlan, MonthPlanRow};
use crate::schema::{dailylist, item, listitem};
use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MonthPlansParams {
    pub user_id: Option<i32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthPlansResponse {
    pub data: Vec<MonthPlan>,
}

#[utoipa::path(
    get,
    path = "/daily-list/month",
    tag = "daily_lists",
    params(MonthPlansParams),
    responses(
        (status = 200, description = "The user's lists for the month, items grouped per list", body = MonthPlansResponse),
        (status = 400, description = "Missing or invalid parameter", body = ErrorResponse)
    )
)]
pub async fn list_month_plans(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<MonthPlansParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(params.user_id, "userId")?;
    let (start, end) = required_month(params.year, params.month)?;

    let mut conn = pool.get()?;

    let rows: Vec<(i32, NaiveDate, i32, String, i32)> = dailylist::table
        .inner_join(listitem::table.inner_join(item::table))
        .filter(dailylist::user_id.eq(user_id))
        .filter(dailylist::date_to_buy.ge(start))
        .filter(dailylist::date_to_buy.lt(end))
        .select((
            dailylist::list_id,
            dailylist::date_to_buy,
            item::item_id,
            item::item_name,
            listitem::amount,
        ))
        .order((dailylist::date_to_buy.asc(), dailylist::list_id.asc(), item::item_id.asc()))
        .load(&mut conn)?;

    let rows = rows
        .into_iter()
        .map(|(list_id, date_to_buy, item_id, item_name, amount)| MonthPlanRow {
            list_id,
            date_to_buy,
            item_id,
            item_name,
            amount,
        })
        .collect();

    Ok(Json(MonthPlansResponse {
        data: format_month_plans(rows),
    }))
}
