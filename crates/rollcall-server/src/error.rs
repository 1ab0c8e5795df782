use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};
use thiserror::Error;

use rollcall_service::ServiceError;

/// Failures while configuring or starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] rollcall_store::StoreError),

    #[error("overlay error: {0}")]
    Overlay(#[from] rollcall_blend::BlendError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// An error response: a status code and a JSON body `{"error": CODE}`.
///
/// Validation failures add a `detail` message. Contributor writes add
/// `"success": false`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    detail: Option<String>,
    report_success: bool,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str) -> Self {
        Self {
            status,
            code,
            detail: None,
            report_success: false,
        }
    }

    /// Malformed request: body, query string or form.
    pub fn validation(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
        }
    }

    /// Add `"success": false` to the body.
    pub fn with_success_flag(mut self) -> Self {
        self.report_success = true;
        self
    }

    /// Map a failed image replacement. A bad upload here is reported as
    /// not found rather than bad request.
    pub fn from_image_update(err: ServiceError) -> Self {
        match err {
            ServiceError::BadImage(e) => Self::new(StatusCode::NOT_FOUND, e.code()),
            other => other.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => Self::validation(e.to_string()),
            ServiceError::Unauthorized { .. } => {
                Self::new(StatusCode::UNAUTHORIZED, "MUST_BE_REGISTERED_CONTRIBUTOR")
            }
            ServiceError::ContributorNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "CONTRIBUTOR_NOT_FOUND")
            }
            ServiceError::ImageNotFound(_) => Self::new(StatusCode::NOT_FOUND, "IMAGE_NOT_FOUND"),
            ServiceError::BadImage(e) => Self::new(StatusCode::BAD_REQUEST, e.code()),
            ServiceError::Blend(e) => {
                tracing::error!(error = %e, "image processing failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "IMAGE_PROCESSING_FAILED")
            }
            ServiceError::Store(e) => {
                tracing::error!(error = %e, "store request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            ServiceError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        if self.report_success {
            body.insert("success".into(), Value::Bool(false));
        }
        body.insert("error".into(), Value::from(self.code));
        if let Some(detail) = self.detail {
            body.insert("detail".into(), Value::String(detail));
        }
        (self.status, Json(Value::Object(body))).into_response()
    }
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
