//! Photo records and the presentational metadata derived from object keys

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// File extensions recognised as images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Tags attached to every photo
pub const PHOTO_TAGS: [&str; 2] = ["family", "photos"];

/// Object metadata as reported by the storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    /// Full object key
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// Backend-assigned modification time
    pub last_modified: DateTime<Utc>,
}

/// A single page returned by the listing call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectListing {
    /// Objects on this page
    pub objects: Vec<ObjectRecord>,
    /// Whether the backend holds more entries than this page returned
    pub truncated: bool,
}

/// Photo entry returned to gallery clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Public or presigned URL the image can be fetched from
    pub url: String,
    /// Storage key of the image
    pub key: String,
    /// ISO-8601 modification timestamp
    pub last_modified: String,
    /// Size in bytes
    pub size: u64,
    /// Display metadata derived from the file name
    pub metadata: PhotoMetadata,
}

/// Display metadata for a photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PhotoMetadata {
    /// Human readable title
    pub title: String,
    /// Short description embedding the title
    pub description: String,
    /// Fixed tag set
    pub tags: Vec<String>,
}

impl PhotoMetadata {
    /// Derives title, description and tags from an object key
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        let title = derive_title(key);
        Self {
            description: format!("Family photo: {title}"),
            title,
            tags: PHOTO_TAGS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PhotoRecord {
    /// Builds the record for a listed object once its URL is known
    #[must_use]
    pub fn new(object: &ObjectRecord, url: String) -> Self {
        Self {
            url,
            key: object.key.clone(),
            last_modified: object.last_modified.to_rfc3339(),
            size: object.size,
            metadata: PhotoMetadata::for_key(&object.key),
        }
    }
}

/// Whether the key ends in one of the recognised image extensions
#[must_use]
pub fn is_image_key(key: &str) -> bool {
    key.rsplit_once('.').is_some_and(|(_, extension)| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known))
    })
}

/// Turns `uploads/Family_Trip-2023.jpg` into `Family Trip 2023`
#[must_use]
pub fn derive_title(key: &str) -> String {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);

    title_case(&stem.replace(['_', '-'], " "))
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest
fn title_case(text: &str) -> String {
    let mut titled = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                titled.extend(ch.to_lowercase());
            } else {
                titled.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            titled.push(ch);
            in_word = false;
        }
    }

    titled
}
