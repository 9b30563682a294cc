use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};

use crate::error::CatalogError;
use crate::models::Violations;

/// Error response: a status code and the JSON body sent with it.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiError {
    pub fn validation(violations: &Violations) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({
                "message": "Validation Error",
                "errors": violations.messages(),
            }),
        }
    }

    pub fn invalid_id(detail: impl Into<String>) -> Self {
        Self::bad_request("Invalid ID format", detail)
    }

    pub fn bad_request(message: &str, detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "message": message, "error": detail.into() }),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: json!({ "message": "Product not found." }),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({
                "message": "An internal server error occurred.",
                "error": detail.into(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, body = %self.body, "request failed");
        } else {
            tracing::debug!(status = %self.status, body = %self.body, "request rejected");
        }
        (self.status, Json(self.body)).into_response()
    }
}

/// One status code and body shape per catalog error kind.
impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Validation(v) => ApiError::validation(&v),
            CatalogError::InvalidId(detail) => ApiError::invalid_id(detail),
            CatalogError::NotFound(_) => ApiError::not_found(),
            other => ApiError::internal(other.to_string()),
        }
    }
}
