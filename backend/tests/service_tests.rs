mod common;

use common::*;

use http::StatusCode;
use photo_gallery_backend::{catalog::testing::InMemoryObjectStore, types::Environment};

#[tokio::test]
async fn test_health() {
    let setup = TestSetup::new(InMemoryObjectStore::new());

    let response = setup.send_get_request("/health").await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["semver"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_document_in_development() {
    let setup = TestSetup::new(InMemoryObjectStore::new());

    let response = setup.send_get_request("/openapi.json").await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert!(body["paths"]["/photos"].is_object());
    assert!(body["paths"]["/photos/presigned"].is_object());
}

#[tokio::test]
async fn test_openapi_document_hidden_in_production() {
    let setup = TestSetup::with_environment(InMemoryObjectStore::new(), Environment::Production);

    let response = setup.send_get_request("/openapi.json").await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors_headers(&response);
}
