use crate::api::extract::Json;
use crate::api::params::{required, required_text};
use crate::api::{ErrorResponse, MessageResponse};
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::schema::{dailylist, item, listitem};
use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemAmountRequest {
    #[serde(default, deserialize_with = "crate::api::params::lenient_date::deserialize")]
    #[schema(value_type = String, format = Date)]
    pub date_to_buy: Option<NaiveDate>,
    pub item_name: Option<String>,
    pub new_amount: Option<i32>,
    /// Restricts the update to this user's lists
    pub user_id: Option<i32>,
}

#[utoipa::path(
    put,
    path = "/daily-list",
    tag = "daily_lists",
    request_body = UpdateItemAmountRequest,
    responses(
        (status = 200, description = "Amount updated", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 404, description = "No matching list item", body = ErrorResponse)
    )
)]
pub async fn update_item_amount(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<UpdateItemAmountRequest>,
) -> ApiResult<impl IntoResponse> {
    let date_to_buy = required(req.date_to_buy, "dateToBuy")?;
    let item_name = required_text(req.item_name, "itemName")?;
    let new_amount = required(req.new_amount, "newAmount")?;

    let mut conn = pool.get()?;

    let updated = conn.immediate_transaction(|conn| {
        let mut lists = dailylist::table
            .filter(dailylist::date_to_buy.eq(date_to_buy))
            .select(dailylist::list_id)
            .into_boxed();
        if let Some(user_id) = req.user_id {
            lists = lists.filter(dailylist::user_id.eq(user_id));
        }
        let list_ids: Vec<i32> = lists.load(conn)?;

        let item_ids: Vec<i32> = item::table
            .filter(item::item_name.eq(&item_name))
            .select(item::item_id)
            .load(conn)?;

        diesel::update(
            listitem::table
                .filter(listitem::list_id.eq_any(&list_ids))
                .filter(listitem::item_id.eq_any(&item_ids)),
        )
        .set(listitem::amount.eq(new_amount))
        .execute(conn)
    })?;

    if updated == 0 {
        return Err(ApiError::not_found("No matching list item found"));
    }

    tracing::info!(%date_to_buy, item_name = %item_name, updated, "list item amount updated");

    Ok(Json(MessageResponse::new("List item amount updated successfully")))
}
