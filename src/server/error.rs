use crate::utils::error::RelayError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;

/// Errors as the HTTP client sees them: a status and a `{"detail": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    Relay(RelayError),
    InvalidBody(JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody(rejection) => rejection.status(),
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::Relay(err) => err.to_string(),
            ApiError::InvalidBody(rejection) => rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        match &self {
            ApiError::Relay(err) if err.is_configuration() => {
                tracing::error!("❌ Refusing submission: {}", detail)
            }
            ApiError::Relay(_) => tracing::error!("❌ Submission failed: {}", detail),
            ApiError::InvalidBody(_) => tracing::debug!("Rejected request body: {}", detail),
        }

        detail_response(status, detail)
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        ApiError::Relay(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

pub fn detail_response(status: StatusCode, detail: impl Into<String>) -> Response {
    let body = Json(json!({ "detail": detail.into() }));
    (status, body).into_response()
}

/// Turns a handler panic into a 500 carrying the panic message.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "Internal server error".to_string()
    };

    tracing::error!("💥 Handler panicked: {}", detail);
    detail_response(StatusCode::INTERNAL_SERVER_ERROR, detail)
}
