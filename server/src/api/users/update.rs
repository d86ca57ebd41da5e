use crate::api::extract::Json;
use crate::api::params::{required, required_text};
use crate::api::{ErrorResponse, MessageResponse};
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{is_valid_email, is_valid_phone_number};
use crate::models::UserInfoChanges;
use crate::schema::users;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfoRequest {
    pub user_id: Option<i32>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// Omit to keep the current introduction
    pub introduction: Option<String>,
}

#[utoipa::path(
    post,
    path = "/user/info",
    tag = "users",
    request_body = UpdateInfoRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Missing field or invalid email/phone", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Username or email taken by another user", body = ErrorResponse)
    )
)]
pub async fn update_info(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<UpdateInfoRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_id = required(req.user_id, "userId")?;
    let username = required_text(req.username, "username")?;
    let email = required_text(req.email, "email")?;
    let phone_number = required_text(req.phone_number, "phoneNumber")?;

    if !is_valid_email(&email) {
        return Err(ApiError::bad_request("Invalid email format"));
    }
    if !is_valid_phone_number(&phone_number) {
        return Err(ApiError::bad_request("Invalid phone number format"));
    }

    let mut conn = pool.get()?;

    let updated = diesel::update(users::table.find(user_id))
        .set(UserInfoChanges {
            username: &username,
            email: &email,
            phone_number: &phone_number,
            introduction: req.introduction.as_deref(),
        })
        .execute(&mut conn)?;

    if updated == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(MessageResponse::new("User info updated successfully")))
}
