use crate::api::extract::{Json, Query};
use crate::api::params::required;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_user_info, UserInfo};
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GetUserParams {
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub data: UserInfo,
}

#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    params(GetUserParams),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 400, description = "Missing userId", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<GetUserParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(params.user_id, "userId")?;

    let mut conn = pool.get()?;

    let user: User = users::table
        .find(user_id)
        .select(User::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse {
        data: format_user_info(user),
    }))
}
