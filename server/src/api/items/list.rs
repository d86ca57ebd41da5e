use crate::api::extract::{Json, Query};
use crate::api::params::page_offset;
use crate::db::DbPool;
use crate::error::ApiResult;
use crate::format::{format_item, ItemView};
use crate::models::Item;
use crate::schema::item;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListItemsParams {
    /// 1-based page number (default 1)
    pub page: Option<i64>,
    /// Page size (default 10, at most 100)
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemPage {
    pub items: Vec<ItemView>,
    pub pagination: Pagination,
}

#[utoipa::path(
    get,
    path = "/item/all",
    tag = "items",
    params(ListItemsParams),
    responses(
        (status = 200, description = "One page of the catalogue", body = ItemPage)
    )
)]
pub async fn list_items(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListItemsParams>,
) -> ApiResult<impl IntoResponse> {
    let limit = params
        .limit
        .filter(|l| *l > 0)
        .map_or(DEFAULT_LIMIT, |l| l.min(MAX_LIMIT));
    let (page, offset) = page_offset(params.page, limit);

    let mut conn = pool.get()?;

    let total_items: i64 = item::table.count().get_result(&mut conn)?;

    let items: Vec<Item> = item::table
        .select(Item::as_select())
        .order(item::item_id.asc())
        .limit(limit)
        .offset(offset)
        .load(&mut conn)?;

    Ok(Json(ItemPage {
        items: format_item(items),
        pagination: Pagination {
            current_page: page,
            total_pages: total_items.saturating_add(limit - 1) / limit,
            total_items,
        },
    }))
}
