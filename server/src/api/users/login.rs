use crate::api::extract::Json;
use crate::api::ErrorResponse;
use crate::auth::verify_password;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    #[serde(rename = "userID")]
    pub user_id: i32,
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "users",
    request_body(content = LoginRequest, example = json!({"username": "an", "password": "password"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing credentials", body = ErrorResponse),
        (status = 401, description = "Incorrect password", body = ErrorResponse),
        (status = 404, description = "Unknown username", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(username), Some(password)) = (
        req.username.filter(|u| !u.is_empty()),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Username and password are required"));
    };

    let mut conn = pool.get()?;

    let account: Option<(i32, String)> = users::table
        .filter(users::username.eq(&username))
        .select((users::user_id, users::password_hash))
        .first(&mut conn)
        .optional()?;

    let Some((user_id, password_hash)) = account else {
        return Err(ApiError::not_found("Username does not exist"));
    };

    if !verify_password(&password, &password_hash) {
        return Err(ApiError::Unauthorized("Incorrect password".to_string()));
    }

    tracing::info!(user_id, "user logged in");

    Ok((StatusCode::OK, Json(LoginResponse { user_id })))
}
