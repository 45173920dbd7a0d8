use axum::response::Response;
use http_body_util::BodyExt;

pub const BUCKET: &str = "family-bucket-22";
pub const REGION: &str = "us-east-2";
pub const PREFIX: &str = "uploads/";

pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, OPTIONS"),
    (
        "access-control-allow-headers",
        "Content-Type, X-Amz-Date, Authorization, X-Api-Key, X-Amz-Security-Token",
    ),
];

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Assert the fixed cross-origin header set is present
pub fn assert_cors_headers(response: &Response) {
    for (name, value) in CORS_HEADERS {
        assert_eq!(
            response.headers().get(name).and_then(|v| v.to_str().ok()),
            Some(value),
            "missing or wrong header: {name}"
        );
    }
}

/// Header value as a string, if present
pub fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
