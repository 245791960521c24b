use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookdb_core::error::Error;

use crate::types::ErrorBody;

/// Adapter from the engine's error taxonomy to HTTP responses.
///
/// Client-class errors keep their message. Retrieval failures are
/// logged here and leave the process as an opaque 500; the underlying
/// cause never reaches a client.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "book not found".to_string()),
            Error::Retrieval(cause) => {
                tracing::error!("catalog retrieval failed: {cause}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
