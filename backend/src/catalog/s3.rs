//! S3 implementation of the object store

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    error::DisplayErrorContext, presigning::PresigningConfig, primitives::DateTime as S3DateTime,
    types::Object, Client as S3Client,
};
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use super::{CatalogError, CatalogResult, ObjectListing, ObjectRecord, ObjectStore};

/// Object store backed by an S3 client
pub struct S3ObjectStore {
    s3_client: Arc<S3Client>,
}

impl S3ObjectStore {
    /// Creates a new store around a pre-configured S3 client
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_objects(&self, bucket: &str, prefix: &str) -> CatalogResult<ObjectListing> {
        debug!("Listing objects in {bucket} under {prefix}");

        let output = self
            .s3_client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| {
                let cause = DisplayErrorContext(&e).to_string();
                error!("Error listing photos from S3: {cause}");
                CatalogError::StorageUnavailable(cause)
            })?;

        let objects = output
            .contents()
            .iter()
            .map(object_record)
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(ObjectListing {
            objects,
            truncated: output.is_truncated().unwrap_or(false),
        })
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> CatalogResult<String> {
        let resolution_failed = |reason: String| CatalogError::UrlResolutionFailed {
            key: key.to_string(),
            reason,
        };

        let presigned_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| resolution_failed(format!("Failed to create presigning config: {e}")))?;

        let presigned_request = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigned_config)
            .await
            .map_err(|e| resolution_failed(DisplayErrorContext(&e).to_string()))?;

        Ok(presigned_request.uri().to_string())
    }
}

/// Converts a listed S3 object into an `ObjectRecord`
fn object_record(object: &Object) -> CatalogResult<ObjectRecord> {
    let key = object
        .key()
        .ok_or_else(|| CatalogError::MalformedListing("object without key".to_string()))?;

    let last_modified = object
        .last_modified()
        .ok_or_else(|| CatalogError::MalformedListing(format!("{key}: missing LastModified")))
        .and_then(|timestamp| {
            to_utc(timestamp).ok_or_else(|| {
                CatalogError::MalformedListing(format!("{key}: LastModified out of range"))
            })
        })?;

    let size = u64::try_from(object.size().unwrap_or_default())
        .map_err(|_| CatalogError::MalformedListing(format!("{key}: negative size")))?;

    Ok(ObjectRecord {
        key: key.to_string(),
        size,
        last_modified,
    })
}

fn to_utc(timestamp: &S3DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}
