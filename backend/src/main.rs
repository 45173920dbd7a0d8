use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use photo_gallery_backend::{
    catalog::{PhotoCatalog, S3ObjectStore},
    server,
    state::CatalogScope,
    types::Environment,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production (CloudWatch), plain text for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let catalog = Arc::new(PhotoCatalog::new(
        Arc::new(S3ObjectStore::new(s3_client)),
        environment.region(),
    ));
    let scope = CatalogScope::from_environment(&environment);

    tracing::info!(
        bucket = %scope.bucket,
        prefix = %scope.prefix,
        region = catalog.region(),
        "Serving photos"
    );

    server::start(environment, catalog, scope).await
}
