use crate::api::extract::Json;
use crate::api::ErrorResponse;
use crate::auth::hash_password;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{is_valid_email, is_valid_phone_number};
use crate::models::NewUser;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: i32,
}

#[utoipa::path(
    post,
    path = "/signup",
    tag = "users",
    request_body(content = SignupRequest, example = json!({
        "username": "an", "password": "password", "email": "an@example.com", "phoneNumber": "0912345678"
    })),
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Missing field or invalid email/phone", body = ErrorResponse),
        (status = 409, description = "Username or email already exists", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(username), Some(password), Some(email), Some(phone_number)) = (
        req.username.filter(|v| !v.trim().is_empty()),
        req.password.filter(|v| !v.is_empty()),
        req.email.filter(|v| !v.trim().is_empty()),
        req.phone_number.filter(|v| !v.trim().is_empty()),
    ) else {
        return Err(ApiError::bad_request("All fields are required"));
    };

    if !is_valid_email(&email) {
        return Err(ApiError::bad_request("Invalid email format"));
    }
    if !is_valid_phone_number(&phone_number) {
        return Err(ApiError::bad_request("Invalid phone number format"));
    }

    let mut conn = pool.get()?;

    let taken: i64 = users::table
        .filter(users::username.eq(&username).or(users::email.eq(&email)))
        .count()
        .get_result(&mut conn)?;
    if taken > 0 {
        return Err(ApiError::conflict("Username or email already exists"));
    }

    let password_hash = hash_password(&password).map_err(|_| ApiError::PasswordHash)?;

    let user_id: i32 = match diesel::insert_into(users::table)
        .values(NewUser {
            username: &username,
            password_hash: &password_hash,
            email: &email,
            phone_number: &phone_number,
        })
        .returning(users::user_id)
        .get_result(&mut conn)
    {
        Ok(id) => id,
        // Lost a race with a concurrent signup for the same name or email
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(ApiError::conflict("Username or email already exists"))
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User registered successfully".to_string(),
            user_id,
        }),
    ))
}
