//! Universal error handling for the API

use std::time::Duration;

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::catalog::CatalogError;

const RETRIEVE_FAILED: &str = "Failed to retrieve photos";

/// Error envelope returned to gallery clients
#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiErrorResponse {
    /// Summary of what failed
    pub error: &'static str,
    /// Underlying cause
    pub message: String,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                error,
                message: message.into(),
            },
        }
    }

    /// Generic 500 carrying `message` as the cause
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            RETRIEVE_FAILED,
            message,
        )
    }

    /// 500 for a request that exceeded the router's time budget
    #[must_use]
    pub fn timeout(after: Duration) -> Self {
        Self::internal(format!("Request timed out after {}s", after.as_secs()))
    }

    /// HTTP status of the error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error,
                self.inner.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error,
                self.inner.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert catalog errors to application errors
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self::internal(err.to_string())
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
