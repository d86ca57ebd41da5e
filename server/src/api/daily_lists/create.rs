use crate::api::extract::Json;
use crate::api::params::required;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::models::{NewDailyList, NewListItem};
use crate::schema::{dailylist, listitem};
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::upsert::excluded;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListItemInput {
    #[serde(rename = "ItemID")]
    pub item_id: i32,
    pub amount: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDailyListRequest {
    #[serde(default)]
    pub list_items: Vec<ListItemInput>,
    #[serde(default, deserialize_with = "crate::api::params::lenient_date::deserialize")]
    #[schema(value_type = String, format = Date)]
    pub date_to_buy: Option<NaiveDate>,
    pub user_id: Option<i32>,
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDailyListResponse {
    pub message: String,
    pub list_id: i32,
}

#[utoipa::path(
    post,
    path = "/daily-list",
    tag = "daily_lists",
    request_body = CreateDailyListRequest,
    responses(
        (status = 201, description = "List and its items created", body = CreateDailyListResponse),
        (status = 400, description = "Missing field or no items", body = ErrorResponse),
        (status = 409, description = "Unknown user or item", body = ErrorResponse)
    )
)]
pub async fn create_daily_list(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateDailyListRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(req.user_id, "userId")?;
    let date_to_buy = required(req.date_to_buy, "dateToBuy")?;
    let cost = req.cost.unwrap_or(0.0);

    if req.list_items.is_empty() {
        return Err(ApiError::bad_request("listItems must not be empty"));
    }

    let mut conn = pool.get()?;

    let list_id = conn.immediate_transaction(|conn| {
        let list_id: i32 = diesel::insert_into(dailylist::table)
            .values(NewDailyList {
                user_id,
                date_to_buy,
                cost,
            })
            .returning(dailylist::list_id)
            .get_result(conn)?;

        // A repeated item keeps the last amount given.
        for line in &req.list_items {
            diesel::insert_into(listitem::table)
                .values(NewListItem {
                    list_id,
                    item_id: line.item_id,
                    amount: line.amount,
                })
                .on_conflict((listitem::list_id, listitem::item_id))
                .do_update()
                .set(listitem::amount.eq(excluded(listitem::amount)))
                .execute(conn)?;
        }

        Ok::<_, diesel::result::Error>(list_id)
    })?;

    tracing::info!(list_id, user_id, items = req.list_items.len(), "daily list created");

    Ok((
        StatusCode::CREATED,
        Json(CreateDailyListResponse {
            message: "Items added successfully".to_string(),
            list_id,
        }),
    ))
}
