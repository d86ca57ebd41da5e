use crate::api::multipart::FormData;
use crate::api::{ErrorResponse, MessageResponse};
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_user_avatar, UserAvatar};
use crate::schema::users;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Multipart form layout for `POST /user/avatar`
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UploadAvatarRequest {
    pub user_id: i32,
    #[schema(value_type = String, format = Binary)]
    pub avatar: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserAvatarsResponse {
    pub users: Vec<UserAvatar>,
}

#[utoipa::path(
    post,
    path = "/user/avatar",
    tag = "users",
    request_body(content_type = "multipart/form-data", content = UploadAvatarRequest),
    responses(
        (status = 200, description = "Avatar updated", body = MessageResponse),
        (status = 400, description = "userId or avatar missing", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn upload_avatar(
    State(pool): State<Arc<DbPool>>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;

    let (Some(user_id), Some(avatar)) = (form.id("userId")?, form.file("avatar")) else {
        tracing::warn!("avatar upload rejected: userId or avatar missing");
        return Err(ApiError::bad_request("userId and avatar image are required"));
    };

    let mut conn = pool.get()?;

    let updated = diesel::update(users::table.find(user_id))
        .set(users::avatar.eq(Some(avatar)))
        .execute(&mut conn)?;

    if updated == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(MessageResponse::new("Avatar updated successfully")))
}

#[utoipa::path(
    get,
    path = "/users/avt",
    tag = "users",
    responses(
        (status = 200, description = "Every user with their avatar", body = UserAvatarsResponse)
    )
)]
pub async fn list_avatars(State(pool): State<Arc<DbPool>>) -> ApiResult<impl IntoResponse> {
    let mut conn = pool.get()?;

    let rows: Vec<(i32, String, Option<Vec<u8>>)> = users::table
        .select((users::user_id, users::username, users::avatar))
        .order(users::user_id.asc())
        .load(&mut conn)?;

    let users = rows
        .into_iter()
        .map(|(user_id, username, avatar)| format_user_avatar(user_id, username, avatar))
        .collect();

    Ok(Json(UserAvatarsResponse { users }))
}
