use std::sync::Arc;

use aide::OperationOutput;
use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Extension, Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    catalog::{PhotoCatalog, PhotoRecord, UrlStrategy},
    state::CatalogScope,
    types::AppError,
};

const NO_STORE: &str = "no-cache, no-store, must-revalidate";

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PhotosResponse {
    /// Photos under the configured prefix, newest first
    pub photos: Vec<PhotoRecord>,
}

/// Response that must never be cached, used for presigned URLs
pub struct NoStore<T>(pub T);

impl<T: IntoResponse> IntoResponse for NoStore<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE));
        response
    }
}

impl<T: OperationOutput> OperationOutput for NoStore<T> {
    type Inner = T::Inner;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        T::operation_response(ctx, operation)
    }
}

/// Lists gallery photos with public bucket URLs
///
/// # Errors
///
/// Returns a 500 `AppError` if the bucket listing fails
#[instrument(skip(catalog, scope))]
pub async fn list_photos(
    Extension(catalog): Extension<Arc<PhotoCatalog>>,
    Extension(scope): Extension<CatalogScope>,
) -> Result<Json<PhotosResponse>, AppError> {
    let photos = catalog
        .resolve(&scope.bucket, &scope.prefix, UrlStrategy::Public)
        .await?;

    tracing::info!("Listed {} photos from {}", photos.len(), scope.bucket);

    Ok(Json(PhotosResponse { photos }))
}

/// Lists gallery photos with short-lived presigned URLs
///
/// Photos whose URL cannot be signed fall back to the public bucket URL.
///
/// # Errors
///
/// Returns a 500 `AppError` if the bucket listing fails
#[instrument(skip(catalog, scope))]
pub async fn list_presigned_photos(
    Extension(catalog): Extension<Arc<PhotoCatalog>>,
    Extension(scope): Extension<CatalogScope>,
) -> Result<NoStore<Json<PhotosResponse>>, AppError> {
    let photos = catalog
        .resolve(&scope.bucket, &scope.prefix, scope.signed_url_strategy)
        .await?;

    tracing::info!(
        "Listed {} presigned photos from {}",
        photos.len(),
        scope.bucket
    );

    Ok(NoStore(Json(PhotosResponse { photos })))
}
