pub mod create;
pub mod list;
pub mod search;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the item catalogue
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/item", post(create::create_item).get(search::get_items))
        .route("/item/all", get(list::list_items))
}

#[derive(OpenApi)]
#[openapi(
    paths(create::create_item, search::get_items, list::list_items),
    components(schemas(
        create::CreateItemRequest,
        create::CreateItemResponse,
        search::ItemsResponse,
        list::Pagination,
        list::ItemPage,
        crate::format::ItemView,
    ))
)]
pub struct ApiDoc;
