use crate::api::extract::{Json, Query};
use crate::api::params::{contains_pattern, keywords};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_item, ItemView};
use crate::models::Item;
use crate::schema::item;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetItemsParams {
    /// Exact item id; takes precedence over `name`
    pub id: Option<i32>,
    /// Matches items whose name contains any of the words
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemsResponse {
    pub data: Vec<ItemView>,
}

#[utoipa::path(
    get,
    path = "/item",
    tag = "items",
    params(GetItemsParams),
    responses(
        (status = 200, description = "Matching items", body = ItemsResponse),
        (status = 400, description = "Neither id nor name given", body = ErrorResponse),
        (status = 404, description = "No item matched", body = ErrorResponse)
    )
)]
pub async fn get_items(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<GetItemsParams>,
) -> ApiResult<impl IntoResponse> {
    let mut query = item::table
        .select(Item::as_select())
        .order(item::item_id.asc())
        .into_boxed();

    let name = params.name.unwrap_or_default();
    let words = keywords(&name);

    if let Some(id) = params.id {
        query = query.filter(item::item_id.eq(id));
    } else if !words.is_empty() {
        let mut patterns = words.into_iter().map(contains_pattern);
        // SQLite's LIKE already ignores ASCII case.
        if let Some(first) = patterns.next() {
            query = query.filter(item::item_name.like(first).escape('\\'));
        }
        for pattern in patterns {
            query = query.or_filter(item::item_name.like(pattern).escape('\\'));
        }
    } else {
        return Err(ApiError::bad_request("Item id or name is required"));
    }

    let mut conn = pool.get()?;
    let items: Vec<Item> = query.load(&mut conn)?;

    if items.is_empty() {
        return Err(ApiError::not_found("Item not found"));
    }

    Ok(Json(ItemsResponse {
        data: format_item(items),
    }))
}
