use crate::api::multipart::FormData;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::models::NewItem;
use crate::schema::item;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Multipart form layout for `POST /item`
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct CreateItemRequest {
    pub item_name: String,
    pub item_description: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemResponse {
    pub message: String,
    pub item_id: i32,
}

#[utoipa::path(
    post,
    path = "/item",
    tag = "items",
    request_body(content_type = "multipart/form-data", content = CreateItemRequest),
    responses(
        (status = 201, description = "Item created", body = CreateItemResponse),
        (status = 400, description = "itemName missing", body = ErrorResponse)
    )
)]
pub async fn create_item(
    State(pool): State<Arc<DbPool>>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;

    let Some(item_name) = form.text("itemName") else {
        return Err(ApiError::bad_request("Item name is required"));
    };

    let mut conn = pool.get()?;

    let item_id: i32 = diesel::insert_into(item::table)
        .values(NewItem {
            item_name,
            item_description: form.text("itemDescription"),
            item_img: form.file("image"),
        })
        .returning(item::item_id)
        .get_result(&mut conn)?;

    tracing::info!(item_id, "item created");

    Ok((
        StatusCode::CREATED,
        Json(CreateItemResponse {
            message: "Item added successfully".to_string(),
            item_id,
        }),
    ))
}
