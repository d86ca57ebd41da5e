use crate::api::extract::Json;
use crate::api::params::required;
use crate::api::{ErrorResponse, MessageResponse};
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::models::NewGroupBuyer;
use crate::schema::grouplist;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceBuyersRequest {
    pub group_id: Option<i32>,
    pub list_id: Option<i32>,
    /// The complete new set of buyers
    #[serde(default)]
    pub buyer_ids: Vec<i32>,
}

#[utoipa::path(
    post,
    path = "/group-list/buyers",
    tag = "group_lists",
    request_body = ReplaceBuyersRequest,
    responses(
        (status = 200, description = "Buyers replaced", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 409, description = "Unknown buyer; previous buyers kept", body = ErrorResponse)
    )
)]
pub async fn replace_buyers(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<ReplaceBuyersRequest>,
) -> ApiResult<impl IntoResponse> {
    let group_id = required(req.group_id, "groupId")?;
    let list_id = required(req.list_id, "listId")?;

    let mut conn = pool.get()?;

    conn.immediate_transaction(|conn| {
        diesel::delete(
            grouplist::table
                .filter(grouplist::group_id.eq(group_id))
                .filter(grouplist::list_id.eq(list_id)),
        )
        .execute(conn)?;

        for buyer_id in &req.buyer_ids {
            diesel::insert_into(grouplist::table)
                .values(NewGroupBuyer {
                    group_id,
                    list_id,
                    buyer_id: *buyer_id,
                })
                .on_conflict_do_nothing()
                .execute(conn)?;
        }

        Ok::<_, diesel::result::Error>(())
    })?;

    tracing::info!(group_id, list_id, buyers = req.buyer_ids.len(), "buyers replaced");

    Ok(Json(MessageResponse::new("OK")))
}
