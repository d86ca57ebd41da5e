use super::FridgeParams;
use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::{ErrorResponse, MessageResponse};
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::schema::fridge;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/fridge/all",
    tag = "fridge",
    params(FridgeParams),
    responses(
        (status = 200, description = "Fridge emptied", body = MessageResponse),
        (status = 400, description = "Missing UserID", body = ErrorResponse)
    )
)]
pub async fn clear_fridge(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<FridgeParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(params.user_id, "UserID")?;

    let mut conn = pool.get()?;

    let deleted = diesel::delete(fridge::table.filter(fridge::user_id.eq(user_id)))
        .execute(&mut conn)?;

    tracing::info!(user_id, deleted, "fridge cleared");

    Ok(Json(MessageResponse::new("All items removed from fridge")))
}
