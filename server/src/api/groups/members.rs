use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::{ErrorResponse, MessageResponse, MissingMembersResponse};
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_user_avatar, UserAvatar};
use crate::models::NewGroupMember;
use crate::schema::{groupmember, grouplist, users};
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use utoipa::ToSchema;

use super::details::GroupParams;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MembersResponse {
    pub data: Vec<UserAvatar>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMembersRequest {
    pub group_id: Option<i32>,
    pub member_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMemberRequest {
    pub group_id: Option<i32>,
    pub member_id: Option<i32>,
}

/// Requested ids with no matching user, in request order, each once.
fn missing_ids(requested: &[i32], existing: &[i32]) -> Vec<i32> {
    let existing: HashSet<i32> = existing.iter().copied().collect();
    let mut reported = HashSet::new();
    requested
        .iter()
        .copied()
        .filter(|id| !existing.contains(id) && reported.insert(*id))
        .collect()
}

#[utoipa::path(
    get,
    path = "/group/members",
    tag = "groups",
    params(GroupParams),
    responses(
        (status = 200, description = "Members of the group", body = MembersResponse),
        (status = 400, description = "Missing groupId", body = ErrorResponse),
        (status = 404, description = "Group has no members", body = ErrorResponse)
    )
)]
pub async fn list_members(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<GroupParams>,
) -> ApiResult<impl IntoResponse> {
    let group_id = required(params.group_id, "groupId")?;

    let mut conn = pool.get()?;

    let rows: Vec<(i32, String, Option<Vec<u8>>)> = groupmember::table
        .inner_join(users::table.on(users::user_id.eq(groupmember::member_id)))
        .filter(groupmember::group_id.eq(group_id))
        .select((users::user_id, users::username, users::avatar))
        .order(users::user_id.asc())
        .load(&mut conn)?;

    if rows.is_empty() {
        return Err(ApiError::not_found("Found 0 members"));
    }

    Ok(Json(MembersResponse {
        data: rows
            .into_iter()
            .map(|(user_id, username, avatar)| format_user_avatar(user_id, username, avatar))
            .collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/group/members",
    tag = "groups",
    request_body = AddMembersRequest,
    responses(
        (status = 200, description = "Members added", body = MessageResponse),
        (status = 400, description = "Missing groupId or empty memberIds", body = ErrorResponse),
        (status = 404, description = "Some users don't exist; nothing was added", body = MissingMembersResponse),
        (status = 409, description = "Unknown group", body = ErrorResponse)
    )
)]
pub async fn add_members(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<AddMembersRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(group_id), Some(member_ids)) = (req.group_id, req.member_ids) else {
        return Err(ApiError::bad_request("Invalid input"));
    };
    if member_ids.is_empty() {
        return Err(ApiError::bad_request("Invalid input"));
    }

    let mut conn = pool.get()?;

    conn.immediate_transaction(|conn| {
        let existing: Vec<i32> = users::table
            .filter(users::user_id.eq_any(&member_ids))
            .select(users::user_id)
            .load(conn)?;

        let missing = missing_ids(&member_ids, &existing);
        if !missing.is_empty() {
            tracing::info!(group_id, ?missing, "rejecting unknown group members");
            return Err(ApiError::MissingMembers(missing));
        }

        for member_id in &member_ids {
            diesel::insert_into(groupmember::table)
                .values(NewGroupMember {
                    group_id,
                    member_id: *member_id,
                })
                .on_conflict_do_nothing()
                .execute(conn)?;
        }

        Ok(())
    })?;

    Ok(Json(MessageResponse::new("Members added successfully")))
}

#[utoipa::path(
    delete,
    path = "/group/member",
    tag = "groups",
    request_body = RemoveMemberRequest,
    responses(
        (status = 200, description = "Member and their buyer assignments removed", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorResponse)
    )
)]
pub async fn remove_member(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<RemoveMemberRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(group_id), Some(member_id)) = (req.group_id, req.member_id) else {
        return Err(ApiError::bad_request("Invalid input"));
    };

    let mut conn = pool.get()?;

    let (unassigned, removed) = conn.immediate_transaction(|conn| {
        let unassigned = diesel::delete(
            grouplist::table
                .filter(grouplist::group_id.eq(group_id))
                .filter(grouplist::buyer_id.eq(member_id)),
        )
        .execute(conn)?;

        let removed = diesel::delete(groupmember::table.find((group_id, member_id))).execute(conn)?;

        Ok::<_, diesel::result::Error>((unassigned, removed))
    })?;

    tracing::info!(group_id, member_id, unassigned, removed, "group member removed");

    Ok(Json(MessageResponse::new("OK")))
}
