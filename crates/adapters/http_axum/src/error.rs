//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use minaret_domain::error::MinaretError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`MinaretError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(MinaretError);

impl From<MinaretError> for ApiError {
    fn from(err: MinaretError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            MinaretError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            MinaretError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            MinaretError::ScheduleSource(_) | MinaretError::Device(_) => {
                tracing::error!(error = %self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
