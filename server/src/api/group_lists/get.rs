use crate::api::daily_lists::get::load_list_items;
use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_group_list, BuyerRow, GroupListView};
use crate::models::DailyList;
use crate::schema::{dailylist, grouplist, users};
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GroupListParams {
    pub list_id: Option<i32>,
    pub group_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupListResponse {
    pub data: GroupListView,
}

#[utoipa::path(
    get,
    path = "/group-list",
    tag = "group_lists",
    params(GroupListParams),
    responses(
        (status = 200, description = "Shared list with its items and buyers", body = GroupListResponse),
        (status = 400, description = "Missing parameter", body = ErrorResponse),
        (status = 404, description = "List is not shared with this group", body = ErrorResponse)
    )
)]
pub async fn get_group_list(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<GroupListParams>,
) -> ApiResult<impl IntoResponse> {
    let list_id = required(params.list_id, "listId")?;
    let group_id = required(params.group_id, "groupId")?;

    let mut conn = pool.get()?;

    let buyers: Vec<(i32, String)> = grouplist::table
        .inner_join(users::table.on(users::user_id.eq(grouplist::buyer_id)))
        .filter(grouplist::list_id.eq(list_id))
        .filter(grouplist::group_id.eq(group_id))
        .select((grouplist::buyer_id, users::username))
        .order(grouplist::buyer_id.asc())
        .load(&mut conn)?;

    if buyers.is_empty() {
        return Err(ApiError::not_found("List not found"));
    }

    let list: DailyList = dailylist::table
        .find(list_id)
        .select(DailyList::as_select())
        .first(&mut conn)?;

    let items = load_list_items(&mut conn, list_id)?;

    let buyers = buyers
        .into_iter()
        .map(|(buyer_id, username)| BuyerRow { buyer_id, username })
        .collect();

    Ok(Json(GroupListResponse {
        data: format_group_list(group_id, list, items, buyers),
    }))
}
