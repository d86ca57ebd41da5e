pub mod buyers;
pub mod get;
pub mod share;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for lists shared with a group
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/group-list", get(get::get_group_list))
        .route("/group-list/share", post(share::share_list))
        .route("/group-list/buyers", post(buyers::replace_buyers))
}

#[derive(OpenApi)]
#[openapi(
    paths(get::get_group_list, share::share_list, buyers::replace_buyers),
    components(schemas(
        get::GroupListResponse,
        share::ShareListRequest,
        buyers::ReplaceBuyersRequest,
        crate::format::GroupListView,
        crate::format::BuyerView,
        crate::format::ListItemView,
    ))
)]
pub struct ApiDoc;
