use crate::api::extract::Json;
use crate::api::params::{required, required_text};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::models::{NewGroup, NewGroupMember};
use crate::schema::{groupmember, groups};
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub group_name: Option<String>,
    pub admin_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupResponse {
    pub message: String,
    pub group_id: i32,
}

#[utoipa::path(
    post,
    path = "/group/create",
    tag = "groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created with its admin as first member", body = CreateGroupResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 409, description = "Unknown admin", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateGroupRequest>,
) -> ApiResult<impl IntoResponse> {
    let group_name = required_text(req.group_name, "groupName")?;
    let admin_id = required(req.admin_id, "adminId")?;

    let mut conn = pool.get()?;

    let group_id = conn.immediate_transaction(|conn| {
        let group_id: i32 = diesel::insert_into(groups::table)
            .values(NewGroup {
                group_name: &group_name,
                admin_id,
            })
            .returning(groups::group_id)
            .get_result(conn)?;

        diesel::insert_into(groupmember::table)
            .values(NewGroupMember {
                group_id,
                member_id: admin_id,
            })
            .execute(conn)?;

        Ok::<_, diesel::result::Error>(group_id)
    })?;

    tracing::info!(group_id, admin_id, "group created");

    Ok((
        StatusCode::CREATED,
        Json(CreateGroupResponse {
            message: "Group created successfully".to_string(),
            group_id,
        }),
    ))
}
