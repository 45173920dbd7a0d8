use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use photo_gallery_backend::{
    catalog::{testing::InMemoryObjectStore, PhotoCatalog, UrlStrategy},
    server,
    state::CatalogScope,
    types::Environment,
};
use tower::ServiceExt;

use super::{BUCKET, PREFIX, REGION};

/// Setup test environment variables and logging
pub fn setup_test_env() {
    dotenvy::from_path(".env.example").ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to an in-memory object store
pub struct TestSetup {
    pub router: Router,
    pub store: Arc<InMemoryObjectStore>,
}

impl TestSetup {
    pub fn new(store: InMemoryObjectStore) -> Self {
        Self::with_environment(
            store,
            Environment::Development {
                presign_expiry_override: None,
            },
        )
    }

    pub fn with_environment(store: InMemoryObjectStore, environment: Environment) -> Self {
        setup_test_env();

        let store = Arc::new(store);
        let catalog = Arc::new(PhotoCatalog::new(store.clone(), REGION));
        let scope = CatalogScope {
            bucket: BUCKET.to_string(),
            prefix: PREFIX.to_string(),
            signed_url_strategy: UrlStrategy::signed(),
        };

        let router = server::build_router(environment, catalog, scope);

        Self { router, store }
    }

    pub async fn send_request(
        &self,
        method: &str,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method(method)
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_request("GET", route).await
    }
}
