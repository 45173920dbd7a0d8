pub mod cors;
mod docs;
pub mod health;
pub mod photos;

use aide::axum::{routing::get, ApiRouter};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .api_route("/photos", get(photos::list_photos))
        .api_route("/photos/presigned", get(photos::list_presigned_photos))
}
