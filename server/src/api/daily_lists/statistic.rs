use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::schema::{dailylist, item, listitem};
use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StatisticParams {
    pub user_id: Option<i32>,
    /// First day included, `YYYY-MM-DD`
    #[param(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    /// Last day included, `YYYY-MM-DD`
    #[param(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
}

/// One bought line: the list it belongs to and the item bought
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticRow {
    pub date_to_buy: NaiveDate,
    pub cost: f64,
    #[serde(rename = "ListID")]
    pub list_id: i32,
    #[serde(rename = "ItemID")]
    pub item_id: i32,
    pub amount: i32,
    pub item_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatisticResponse {
    pub data: Vec<StatisticRow>,
}

#[utoipa::path(
    get,
    path = "/statistic",
    tag = "daily_lists",
    params(StatisticParams),
    responses(
        (status = 200, description = "Every list line in the date range, oldest first", body = StatisticResponse),
        (status = 400, description = "Missing parameter", body = ErrorResponse)
    )
)]
pub async fn get_statistic(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<StatisticParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(params.user_id, "userId")?;
    let start_date = required(params.start_date, "startDate")?;
    let end_date = required(params.end_date, "endDate")?;

    let mut conn = pool.get()?;

    let rows: Vec<(NaiveDate, f64, i32, i32, i32, String)> = dailylist::table
        .inner_join(listitem::table.inner_join(item::table))
        .filter(dailylist::user_id.eq(user_id))
        .filter(dailylist::date_to_buy.between(start_date, end_date))
        .select((
            dailylist::date_to_buy,
            dailylist::cost,
            listitem::list_id,
            listitem::item_id,
            listitem::amount,
            item::item_name,
        ))
        .order((
            dailylist::date_to_buy.asc(),
            listitem::list_id.asc(),
            listitem::item_id.asc(),
        ))
        .load(&mut conn)?;

    let data = rows
        .into_iter()
        .map(
            |(date_to_buy, cost, list_id, item_id, amount, item_name)| StatisticRow {
                date_to_buy,
                cost,
                list_id,
                item_id,
                amount,
                item_name,
            },
        )
        .collect();

    Ok(Json(StatisticResponse { data }))
}
