use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body extractor whose rejection goes through `ApiError`, so malformed
/// bodies get a 400 with an `{"error": ...}` body. Also usable as a response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string extractor with the same rejection handling as [`Json`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        id: i32,
    }

    #[tokio::test]
    async fn bad_query_value_is_a_bad_request() {
        let request = Request::builder()
            .uri("/?id=abc")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let err = Query::<Params>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn mistyped_json_field_is_a_bad_request() {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id": "seven"}"#))
            .unwrap();

        let err = Json::<Params>::from_request(request, &()).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn well_formed_query_is_extracted() {
        let request = Request::builder()
            .uri("/?id=7")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let Query(params) = Query::<Params>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(params.id, 7);
    }
}
