pub mod clear;
pub mod list;
pub mod remove;
pub mod upsert;

use crate::AppState;
use axum::routing::{delete, get};
use axum::Router;
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

/// Returns the router for a user's fridge stock
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/fridge", get(list::get_fridge))
        .route("/fridge/all", delete(clear::clear_fridge))
        .route(
            "/fridge/item",
            delete(remove::remove_fridge_item).post(upsert::upsert_fridge_item),
        )
}

/// Query keys used by the fridge endpoints
#[derive(Debug, Deserialize, IntoParams)]
pub struct FridgeParams {
    #[serde(rename = "UserID")]
    pub user_id: Option<i32>,
    #[serde(rename = "ItemID")]
    pub item_id: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::get_fridge,
        clear::clear_fridge,
        remove::remove_fridge_item,
        upsert::upsert_fridge_item,
    ),
    components(schemas(
        list::FridgeResponse,
        upsert::UpsertFridgeItemRequest,
        crate::format::FridgeItemView,
    ))
)]
pub struct ApiDoc;
