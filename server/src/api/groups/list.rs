use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_group_summary, GroupSummary};
use crate::models::Group;
use crate::schema::{groupmember, groups, users};
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupsParams {
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupsResponse {
    pub data: Vec<GroupSummary>,
}

#[utoipa::path(
    get,
    path = "/group/user",
    tag = "groups",
    params(UserGroupsParams),
    responses(
        (status = 200, description = "Groups the user belongs to", body = GroupsResponse),
        (status = 400, description = "Missing or invalid userId", body = ErrorResponse),
        (status = 404, description = "User is in no group", body = ErrorResponse)
    )
)]
pub async fn list_user_groups(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<UserGroupsParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(params.user_id, "userId")?;

    let mut conn = pool.get()?;

    let rows: Vec<(Group, String)> = groupmember::table
        .inner_join(groups::table)
        .inner_join(users::table.on(users::user_id.eq(groups::admin_id)))
        .filter(groupmember::member_id.eq(user_id))
        .select((Group::as_select(), users::username))
        .order(groups::group_id.asc())
        .load(&mut conn)?;

    if rows.is_empty() {
        return Err(ApiError::not_found("No group with this user"));
    }

    Ok(Json(GroupsResponse {
        data: rows
            .into_iter()
            .map(|(group, admin)| format_group_summary(group, admin))
            .collect(),
    }))
}
