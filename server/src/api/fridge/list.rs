use super::FridgeParams;
use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_fridge_items, FridgeItemView, FridgeRow};
use crate::schema::{fridge, item};
use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FridgeResponse {
    pub data: Vec<FridgeItemView>,
}

type FridgeTuple = (
    i32,
    Option<NaiveDate>,
    i32,
    String,
    Option<String>,
    Option<Vec<u8>>,
);

#[utoipa::path(
    get,
    path = "/fridge",
    tag = "fridge",
    params(FridgeParams),
    responses(
        (status = 200, description = "Items stocked in the user's fridge", body = FridgeResponse),
        (status = 400, description = "Missing or invalid UserID", body = ErrorResponse),
        (status = 404, description = "Fridge is empty", body = ErrorResponse)
    )
)]
pub async fn get_fridge(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<FridgeParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(params.user_id, "UserID")?;

    let mut conn = pool.get()?;

    let rows: Vec<FridgeTuple> = fridge::table
        .inner_join(item::table)
        .filter(fridge::user_id.eq(user_id))
        .select((
            fridge::item_id,
            fridge::expire_date,
            fridge::amount,
            item::item_name,
            item::item_description,
            item::item_img,
        ))
        .order(fridge::item_id.asc())
        .load(&mut conn)?;

    if rows.is_empty() {
        return Err(ApiError::not_found("No items found in fridge"));
    }

    let rows = rows
        .into_iter()
        .map(
            |(item_id, expire_date, amount, item_name, item_description, item_img)| FridgeRow {
                item_id,
                expire_date,
                amount,
                item_name,
                item_description,
                item_img,
            },
        )
        .collect();

    Ok(Json(FridgeResponse {
        data: format_fridge_items(rows),
    }))
}
