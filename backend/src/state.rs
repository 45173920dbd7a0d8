//! Request-independent settings shared with handlers

use crate::{catalog::UrlStrategy, types::Environment};

/// Where the photo routes list from and how presigned URLs are issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogScope {
    /// Bucket holding the photos
    pub bucket: String,
    /// Key prefix photos are listed under
    pub prefix: String,
    /// Strategy used by the presigned photos route
    pub signed_url_strategy: UrlStrategy,
}

impl CatalogScope {
    /// Reads the scope from the environment configuration
    #[must_use]
    pub fn from_environment(environment: &Environment) -> Self {
        Self {
            bucket: environment.bucket_name(),
            prefix: environment.photo_prefix(),
            signed_url_strategy: environment.signed_url_strategy(),
        }
    }
}
