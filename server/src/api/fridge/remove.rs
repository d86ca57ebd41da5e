use super::FridgeParams;
use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::{ErrorResponse, MessageResponse};
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::schema::fridge;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/fridge/item",
    tag = "fridge",
    params(FridgeParams),
    responses(
        (status = 200, description = "Item removed from the fridge", body = MessageResponse),
        (status = 400, description = "Missing UserID or ItemID", body = ErrorResponse),
        (status = 404, description = "Item not in the fridge", body = ErrorResponse)
    )
)]
pub async fn remove_fridge_item(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<FridgeParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(params.user_id, "UserID")?;
    let item_id = required(params.item_id, "ItemID")?;

    let mut conn = pool.get()?;

    let deleted = diesel::delete(fridge::table.find((user_id, item_id))).execute(&mut conn)?;

    if deleted == 0 {
        return Err(ApiError::not_found("Item not found in fridge"));
    }

    Ok(Json(MessageResponse::new("Item removed from fridge")))
}
