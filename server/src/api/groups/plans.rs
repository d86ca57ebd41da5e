use crate::api::extract::{Json, Query};
use crate::api::params::{required, required_month};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::format::{format_group_plans, GroupPlan, GroupPlanRow};
use crate::schema::{dailylist, grouplist, users};
use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GroupPlansParams {
    pub group_id: Option<i32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupPlansResponse {
    pub data: Vec<GroupPlan>,
}

#[utoipa::path(
    get,
    path = "/group/plans",
    tag = "groups",
    params(GroupPlansParams),
    responses(
        (status = 200, description = "Lists shared with the group that month, with their buyers", body = GroupPlansResponse),
        (status = 400, description = "Missing or invalid parameter", body = ErrorResponse)
    )
)]
pub async fn list_group_plans(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<GroupPlansParams>,
) -> ApiResult<impl IntoResponse> {
    let group_id = required(params.group_id, "groupId")?;
    let (start, end) = required_month(params.year, params.month)?;

    let mut conn = pool.get()?;

    let rows: Vec<(i32, NaiveDate, i32, String)> = grouplist::table
        .inner_join(dailylist::table)
        .inner_join(users::table.on(users::user_id.eq(grouplist::buyer_id)))
        .filter(grouplist::group_id.eq(group_id))
        .filter(dailylist::date_to_buy.ge(start))
        .filter(dailylist::date_to_buy.lt(end))
        .select((
            grouplist::list_id,
            dailylist::date_to_buy,
            grouplist::buyer_id,
            users::username,
        ))
        .order((dailylist::date_to_buy.asc(), grouplist::list_id.asc(), grouplist::buyer_id.asc()))
        .load(&mut conn)?;

    let rows = rows
        .into_iter()
        .map(|(list_id, date_to_buy, buyer_id, username)| GroupPlanRow {
            list_id,
            date_to_buy,
            buyer_id,
            username,
        })
        .collect();

    Ok(Json(GroupPlansResponse {
        data: format_group_plans(rows),
    }))
}
