use crate::api::multipart::FormData;
use crate::api::{ErrorResponse, MessageResponse};
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::schema::groups;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Multipart form layout for `POST /group/avatar`
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct UploadGroupAvatarRequest {
    #[serde(rename = "groupId")]
    pub group_id: i32,
    #[schema(value_type = String, format = Binary)]
    pub groupimg: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/group/avatar",
    tag = "groups",
    request_body(content_type = "multipart/form-data", content = UploadGroupAvatarRequest),
    responses(
        (status = 200, description = "Group image updated", body = MessageResponse),
        (status = 400, description = "groupId or image missing", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn upload_group_avatar(
    State(pool): State<Arc<DbPool>>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;

    let (Some(group_id), Some(image)) = (form.id("groupId")?, form.file("groupimg")) else {
        return Err(ApiError::bad_request("groupId and groupimg are required"));
    };

    let mut conn = pool.get()?;

    let updated = diesel::update(groups::table.find(group_id))
        .set(groups::group_img.eq(Some(image)))
        .execute(&mut conn)?;

    if updated == 0 {
        return Err(ApiError::not_found("Group not found"));
    }

    Ok(Json(MessageResponse::new("Image uploaded successfully")))
}
