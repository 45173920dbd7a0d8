use std::sync::Arc;
use std::time::Duration;

use aide::openapi::OpenApi;
use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue},
    middleware, BoxError, Extension, Router,
};
use tokio::net::TcpListener;
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::routes::{self, cors};
use crate::{catalog::PhotoCatalog, state::CatalogScope, types::AppError, types::Environment};

/// Upper bound on handling a single request; S3 calls time out before this
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Assembles the router with all routes, shared dependencies and layers
pub fn build_router(
    environment: Environment,
    catalog: Arc<PhotoCatalog>,
    scope: CatalogScope,
) -> Router {
    let mut openapi = OpenApi::default();

    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(catalog))
        .layer(Extension(scope))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(REQUEST_TIMEOUT),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(cors::preflight))
        // Outermost so timeouts and unmatched routes carry the headers too
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(cors::ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(cors::ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(cors::ALLOW_HEADERS),
        ))
}

/// Turns middleware failures into the JSON error envelope
async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::timeout(REQUEST_TIMEOUT)
    } else {
        AppError::internal(err.to_string())
    }
}

/// Starts serving, through the Lambda runtime when deployed as a function and
/// on a TCP listener otherwise
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    catalog: Arc<PhotoCatalog>,
    scope: CatalogScope,
) -> anyhow::Result<()> {
    let router = build_router(environment, catalog, scope);

    if Environment::running_in_lambda() {
        tracing::info!("Photo Gallery Backend started in Lambda runtime");
        return lambda_http::run(router)
            .await
            .map_err(|e| anyhow::anyhow!(e));
    }

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8001), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Photo Gallery Backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    use tokio::signal;

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = signal::ctrl_c() => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
