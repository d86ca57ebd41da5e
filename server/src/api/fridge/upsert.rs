use crate::api::extract::Json;
use crate::api::params::required;
use crate::api::{ErrorResponse, MessageResponse};
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::models::NewFridgeEntry;
use crate::schema::fridge;
use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::upsert::excluded;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertFridgeItemRequest {
    pub item_id: Option<i32>,
    pub user_id: Option<i32>,
    #[serde(default, deserialize_with = "crate::api::params::lenient_date::deserialize")]
    #[schema(value_type = Option<String>, format = Date)]
    pub expire_date: Option<NaiveDate>,
    pub amount: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/fridge/item",
    tag = "fridge",
    request_body = UpsertFridgeItemRequest,
    responses(
        (status = 200, description = "Fridge entry stored", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 409, description = "Unknown user or item", body = ErrorResponse)
    )
)]
pub async fn upsert_fridge_item(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<UpsertFridgeItemRequest>,
) -> ApiResult<impl IntoResponse> {
    let entry = NewFridgeEntry {
        user_id: required(req.user_id, "userId")?,
        item_id: required(req.item_id, "itemId")?,
        expire_date: req.expire_date,
        amount: required(req.amount, "amount")?,
    };

    let mut conn = pool.get()?;

    diesel::insert_into(fridge::table)
        .values(&entry)
        .on_conflict((fridge::user_id, fridge::item_id))
        .do_update()
        .set((
            fridge::amount.eq(excluded(fridge::amount)),
            fridge::expire_date.eq(excluded(fridge::expire_date)),
        ))
        .execute(&mut conn)?;

    Ok(Json(MessageResponse::new("Fridge item saved")))
}
