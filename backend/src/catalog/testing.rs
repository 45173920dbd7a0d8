//! In-memory object store for tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;

use super::{CatalogError, CatalogResult, ObjectListing, ObjectRecord, ObjectStore};

/// Object store backed by a fixed list of objects
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: Vec<ObjectRecord>,
    truncated: bool,
    listing_error: Option<String>,
    listing_delay: Option<Duration>,
    failing_keys: HashSet<String>,
    list_calls: AtomicUsize,
    presign_calls: AtomicUsize,
}

impl InMemoryObjectStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object modified `modified_secs` seconds after the Unix epoch
    ///
    /// # Panics
    ///
    /// Panics if `modified_secs` is outside the supported timestamp range
    #[must_use]
    pub fn with_object(mut self, key: &str, size: u64, modified_secs: i64) -> Self {
        self.objects.push(ObjectRecord {
            key: key.to_string(),
            size,
            last_modified: DateTime::from_timestamp(modified_secs, 0)
                .expect("timestamp in range"),
        });
        self
    }

    /// Reports the listing as truncated
    #[must_use]
    pub const fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    /// Makes every listing call fail with `message`
    #[must_use]
    pub fn failing_listing(mut self, message: &str) -> Self {
        self.listing_error = Some(message.to_string());
        self
    }

    /// Makes presigning fail for `key`
    #[must_use]
    pub fn failing_presign_for(mut self, key: &str) -> Self {
        self.failing_keys.insert(key.to_string());
        self
    }

    /// Makes every listing call wait `delay` before answering
    #[must_use]
    pub const fn with_listing_delay(mut self, delay: Duration) -> Self {
        self.listing_delay = Some(delay);
        self
    }

    /// Number of listing calls served
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of presign calls served
    #[must_use]
    pub fn presign_calls(&self) -> usize {
        self.presign_calls.load(Ordering::SeqCst)
    }

    /// URL the store hands out for a successfully signed key
    #[must_use]
    pub fn signed_url(bucket: &str, key: &str, expires_in_secs: u64) -> String {
        format!(
            "https://{bucket}.s3.amazonaws.com/{key}?X-Amz-Expires={expires_in_secs}&X-Amz-Signature=test"
        )
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list_objects(&self, _bucket: &str, prefix: &str) -> CatalogResult<ObjectListing> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.listing_delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = &self.listing_error {
            return Err(CatalogError::StorageUnavailable(message.clone()));
        }

        Ok(ObjectListing {
            objects: self
                .objects
                .iter()
                .filter(|object| object.key.starts_with(prefix))
                .cloned()
                .collect(),
            truncated: self.truncated,
        })
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> CatalogResult<String> {
        self.presign_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_keys.contains(key) {
            return Err(CatalogError::UrlResolutionFailed {
                key: key.to_string(),
                reason: "signing rejected".to_string(),
            });
        }

        Ok(Self::signed_url(bucket, key, expires_in.as_secs()))
    }
}
