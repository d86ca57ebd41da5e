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
pub struct ShareListRequest {
    pub list_id: Option<i32>,
    pub group_id: Option<i32>,
    /// Becomes the list's buyer in the group
    pub user_id: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/group-list/share",
    tag = "group_lists",
    request_body = ShareListRequest,
    responses(
        (status = 200, description = "List shared; sharing twice is a no-op", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 409, description = "Unknown list, group or user", body = ErrorResponse)
    )
)]
pub async fn share_list(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<ShareListRequest>,
) -> ApiResult<impl IntoResponse> {
    let row = NewGroupBuyer {
        group_id: required(req.group_id, "groupId")?,
        list_id: required(req.list_id, "listId")?,
        buyer_id: required(req.user_id, "userId")?,
    };

    let mut conn = pool.get()?;

    let inserted = diesel::insert_into(grouplist::table)
        .values(&row)
        .on_conflict_do_nothing()
        .execute(&mut conn)?;

    tracing::info!(
        group_id = row.group_id,
        list_id = row.list_id,
        inserted,
        "list shared with group"
    );

    Ok(Json(MessageResponse::new("List shared")))
}
