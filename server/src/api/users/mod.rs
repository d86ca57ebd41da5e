pub mod avatar;
pub mod get;
pub mod login;
pub mod search;
pub mod signup;
pub mod update;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for account and profile endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login::login))
        .route("/signup", post(signup::signup))
        .route("/user", get(get::get_user))
        .route("/user/info", post(update::update_info))
        .route("/user/avatar", post(avatar::upload_avatar))
        .route("/users/avt", get(avatar::list_avatars))
        .route("/search/user", post(search::search_users))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        login::login,
        signup::signup,
        get::get_user,
        update::update_info,
        avatar::upload_avatar,
        avatar::list_avatars,
        search::search_users,
    ),
    components(schemas(
        login::LoginRequest,
        login::LoginResponse,
        signup::SignupRequest,
        signup::SignupResponse,
        get::UserResponse,
        update::UpdateInfoRequest,
        avatar::UploadAvatarRequest,
        avatar::UserAvatarsResponse,
        search::SearchUsersRequest,
        search::UsersResponse,
        crate::format::UserInfo,
        crate::format::UserAvatar,
    ))
)]
pub struct ApiDoc;
