use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_daily_list, DailyListView, ListItemRow};
use crate::models::DailyList;
use crate::schema::{dailylist, item, listitem};
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GetDailyListParams {
    pub list_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyListResponse {
    pub data: DailyListView,
}

/// Item lines of one list, joined with the catalogue
pub(crate) fn load_list_items(
    conn: &mut SqliteConnection,
    list_id: i32,
) -> QueryResult<Vec<ListItemRow>> {
    let rows: Vec<(i32, i32, String, Option<Vec<u8>>, i32)> = listitem::table
        .inner_join(item::table)
        .filter(listitem::list_id.eq(list_id))
        .select((
            listitem::list_id,
            item::item_id,
            item::item_name,
            item::item_img,
            listitem::amount,
        ))
        .order(item::item_id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(list_id, item_id, item_name, item_img, amount)| ListItemRow {
            list_id,
            item_id,
            item_name,
            item_img,
            amount,
        })
        .collect())
}

#[utoipa::path(
    get,
    path = "/daily-list",
    tag = "daily_lists",
    params(GetDailyListParams),
    responses(
        (status = 200, description = "The list with its items", body = DailyListResponse),
        (status = 400, description = "Missing listId", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse)
    )
)]
pub async fn get_daily_list(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<GetDailyListParams>,
) -> ApiResult<impl IntoResponse> {
    let list_id = required(params.list_id, "listId")?;

    let mut conn = pool.get()?;

    let list: DailyList = dailylist::table
        .find(list_id)
        .select(DailyList::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or_else(|| ApiError::not_found("List not found"))?;

    let items = load_list_items(&mut conn, list_id)?;

    Ok(Json(DailyListResponse {
        data: format_daily_list(list, items),
    }))
}
