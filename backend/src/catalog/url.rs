//! URL resolution strategies for listed photos

use std::time::Duration;

/// Default validity window for presigned URLs
pub const DEFAULT_PRESIGNED_URL_EXPIRY: Duration = Duration::from_secs(60 * 60);

/// How photo URLs are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlStrategy {
    /// Virtual-hosted style S3 URL, requires a publicly readable bucket
    Public,
    /// Time-limited presigned `GetObject` URL
    Signed {
        /// How long the URL stays valid
        expires_in: Duration,
    },
}

impl UrlStrategy {
    /// Signed strategy with the default one hour validity
    #[must_use]
    pub const fn signed() -> Self {
        Self::Signed {
            expires_in: DEFAULT_PRESIGNED_URL_EXPIRY,
        }
    }
}

/// Builds the public URL of an object; performs no network call
#[must_use]
pub fn public_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}
