//! Error types for catalog operations

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building the photo catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The listing call against the bucket failed (network, permissions, missing bucket)
    #[error("{0}")]
    StorageUnavailable(String),

    /// The listing succeeded but returned an entry that cannot be turned into a photo
    #[error("Malformed listing entry: {0}")]
    MalformedListing(String),

    /// A signed URL could not be produced for a single object
    #[error("Failed to sign URL for {key}: {reason}")]
    UrlResolutionFailed {
        /// Object key the URL was requested for
        key: String,
        /// Backend error description
        reason: String,
    },
}

impl CatalogError {
    /// Whether the error aborts a whole catalog request
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::UrlResolutionFailed { .. })
    }
}
