use crate::api::extract::Json;
use crate::api::params::{contains_pattern, keywords};
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
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SearchUsersRequest {
    /// Every whitespace-separated word must appear in the username
    pub name: Option<String>,
    pub ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UsersResponse {
    pub data: Vec<UserInfo>,
}

#[utoipa::path(
    post,
    path = "/search/user",
    tag = "users",
    request_body = SearchUsersRequest,
    responses(
        (status = 200, description = "Matching users", body = UsersResponse),
        (status = 400, description = "Neither name nor ids given", body = ErrorResponse)
    )
)]
pub async fn search_users(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<SearchUsersRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = req.name.unwrap_or_default();
    let words = keywords(&name);

    let mut query = users::table
        .select(User::as_select())
        .order(users::user_id.asc())
        .into_boxed();

    if !words.is_empty() {
        for word in words {
            query = query.filter(users::username.like(contains_pattern(word)).escape('\\'));
        }
    } else if let Some(ids) = req.ids {
        query = query.filter(users::user_id.eq_any(ids));
    } else {
        return Err(ApiError::bad_request("Name or ids not provided"));
    }

    let mut conn = pool.get()?;
    let found: Vec<User> = query.load(&mut conn)?;

    Ok(Json(UsersResponse {
        data: found.into_iter().map(format_user_info).collect(),
    }))
}
