//! Fixed cross-origin policy: header values stamped by the router and the preflight answer

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// `Access-Control-Allow-Origin` value
pub const ALLOW_ORIGIN: &str = "*";
/// `Access-Control-Allow-Methods` value
pub const ALLOW_METHODS: &str = "GET, OPTIONS";
/// `Access-Control-Allow-Headers` value
pub const ALLOW_HEADERS: &str =
    "Content-Type, X-Amz-Date, Authorization, X-Api-Key, X-Amz-Security-Token";

/// Answers preflight requests without reaching the routes
pub async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }

    next.run(request).await
}
