//! Photo catalog built from a bucket listing
mod error;
mod photo;
mod s3;
mod url;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

pub use error::{CatalogError, CatalogResult};
pub use photo::{
    derive_title, is_image_key, ObjectListing, ObjectRecord, PhotoMetadata, PhotoRecord,
    IMAGE_EXTENSIONS, PHOTO_TAGS,
};
pub use s3::S3ObjectStore;
pub use url::{public_url, UrlStrategy, DEFAULT_PRESIGNED_URL_EXPIRY};

/// Storage backend operations the catalog depends on
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Lists a single page of objects under `prefix`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StorageUnavailable` if the listing call fails
    /// Returns `CatalogError::MalformedListing` if an entry cannot be interpreted
    async fn list_objects(&self, bucket: &str, prefix: &str) -> CatalogResult<ObjectListing>;

    /// Produces a presigned `GetObject` URL for `key`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UrlResolutionFailed` if signing fails
    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration)
        -> CatalogResult<String>;
}

/// Lists image objects and resolves them into photo records
pub struct PhotoCatalog {
    store: Arc<dyn ObjectStore>,
    region: String,
}

impl PhotoCatalog {
    /// Creates a new catalog
    ///
    /// # Arguments
    ///
    /// * `store` - Shared storage backend handle
    /// * `region` - Region used in public URLs
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, region: impl Into<String>) -> Self {
        Self {
            store,
            region: region.into(),
        }
    }

    /// Region used in public URLs
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Lists the photos under `prefix`, newest first
    ///
    /// Only the first page of the listing is consumed. Signed URL failures are
    /// not fatal: the affected photo falls back to its public URL.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StorageUnavailable` if the listing call fails
    /// Returns `CatalogError::MalformedListing` if the listing contains an unusable entry
    pub async fn resolve(
        &self,
        bucket: &str,
        prefix: &str,
        strategy: UrlStrategy,
    ) -> CatalogResult<Vec<PhotoRecord>> {
        let listing = self.store.list_objects(bucket, prefix).await?;

        if listing.truncated {
            warn!(
                bucket,
                prefix, "Listing truncated, only the first page of objects is returned"
            );
        }

        let mut images: Vec<ObjectRecord> = listing
            .objects
            .into_iter()
            .filter(|object| is_image_key(&object.key))
            .collect();

        // Stable, so equal timestamps keep listing order
        images.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

        let mut photos = Vec::with_capacity(images.len());
        for object in &images {
            let url = self.resolve_url(bucket, &object.key, strategy).await;
            photos.push(PhotoRecord::new(object, url));
        }

        debug!(bucket, prefix, count = photos.len(), "Resolved photo catalog");

        Ok(photos)
    }

    async fn resolve_url(&self, bucket: &str, key: &str, strategy: UrlStrategy) -> String {
        match strategy {
            UrlStrategy::Public => public_url(bucket, &self.region, key),
            UrlStrategy::Signed { expires_in } => {
                match self.store.presign_get(bucket, key, expires_in).await {
                    Ok(url) => url,
                    Err(e) => {
                        warn!("Error generating pre-signed URL for {key}: {e}");
                        public_url(bucket, &self.region, key)
                    }
                }
            }
        }
    }
}
