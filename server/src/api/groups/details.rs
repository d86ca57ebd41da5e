use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_group_details, GroupDetails, MemberRow};
use crate::models::Group;
use crate::schema::{groupmember, groups, users};
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GroupParams {
    pub group_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupDetailsResponse {
    pub data: GroupDetails,
}

#[utoipa::path(
    get,
    path = "/group/details",
    tag = "groups",
    params(GroupParams),
    responses(
        (status = 200, description = "Group with its members", body = GroupDetailsResponse),
        (status = 400, description = "Missing groupId", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group_details(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<GroupParams>,
) -> ApiResult<impl IntoResponse> {
    let group_id = required(params.group_id, "groupId")?;

    let mut conn = pool.get()?;

    let group: Group = groups::table
        .find(group_id)
        .select(Group::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or_else(|| ApiError::not_found("Group not found"))?;

    let members: Vec<(i32, String, Option<Vec<u8>>)> = groupmember::table
        .inner_join(users::table.on(users::user_id.eq(groupmember::member_id)))
        .filter(groupmember::group_id.eq(group_id))
        .select((groupmember::member_id, users::username, users::avatar))
        .order(groupmember::member_id.asc())
        .load(&mut conn)?;

    let members = members
        .into_iter()
        .map(|(member_id, username, avatar)| MemberRow {
            member_id,
            username,
            avatar,
        })
        .collect();

    Ok(Json(GroupDetailsResponse {
        data: format_group_details(group, members),
    }))
}
