//! Family Photo Gallery backend service

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]
#![warn(missing_docs)]

/// Photo catalog built from the bucket listing
pub mod catalog;

/// HTTP routes
#[allow(missing_docs)]
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Settings shared with handlers
pub mod state;

/// Configuration and error types
pub mod types;
