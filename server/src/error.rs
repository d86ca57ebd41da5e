use crate::api::{ErrorResponse, MissingMembersResponse};
use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Every failure a handler can report. The HTTP status is the only status
/// channel; the body is always `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Some users not found")]
    MissingMembers(Vec<i32>),

    #[error("database error: {0}")]
    Database(#[from] DieselError),

    #[error("database pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("failed to hash password")]
    PasswordHash,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => error_body(StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => error_body(StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => error_body(StatusCode::CONFLICT, message),
            ApiError::Unauthorized(message) => error_body(StatusCode::UNAUTHORIZED, message),
            ApiError::MissingMembers(missing_members) => (
                StatusCode::NOT_FOUND,
                Json(MissingMembersResponse {
                    error: "Some users not found".to_string(),
                    missing_members,
                }),
            )
                .into_response(),
            ApiError::Database(DieselError::NotFound) => {
                error_body(StatusCode::NOT_FOUND, "Record not found")
            }
            ApiError::Database(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => {
                tracing::warn!("Unique constraint violated: {}", info.message());
                error_body(StatusCode::CONFLICT, "Record already exists")
            }
            ApiError::Database(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => {
                tracing::warn!("Foreign key constraint violated: {}", info.message());
                error_body(
                    StatusCode::CONFLICT,
                    "Operation conflicts with related records",
                )
            }
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            ApiError::Pool(e) => {
                tracing::error!("Failed to get DB connection: {}", e);
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database connection failed",
                )
            }
            ApiError::Multipart(e) => {
                tracing::warn!("Multipart read error: {}", e);
                let message = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    "File too large".to_string()
                } else {
                    format!("Failed to read multipart data: {}", e.body_text())
                };
                error_body(e.status(), message)
            }
            ApiError::PasswordHash => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Failed to hash password")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(
            ApiError::bad_request("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("x").into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::MissingMembers(vec![7]).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let response = ApiError::from(DieselError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_database_errors_map_to_500() {
        let response = ApiError::from(DieselError::RollbackTransaction).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
