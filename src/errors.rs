use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid or missing API Key")]
    Unauthorized,
    #[error("{0}")]
    Validation(String),
    #[error("Message not found")]
    NotFound,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

// `detail` matches what existing callers of the service parse
#[derive(Serialize, Debug)]
struct ErrorResponse {
    detail: String,
}

impl ErrorResponse {
    fn json(detail: String) -> Json<Self> {
        Json(Self { detail })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self {
            ApiError::Unauthorized => {
                warn!("Unauthorized access attempt detected");
                StatusCode::UNAUTHORIZED
            }
            ApiError::Validation(reason) => {
                debug!("Rejected message body: {reason}");
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unexpected(e) => {
                error!("Unexpected server error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let detail = match &self {
            ApiError::Unexpected(_) => "Unexpected server error".into(),
            _ => self.to_string(),
        };

        (code, ErrorResponse::json(detail)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
