mod config;
mod error;
mod routes;
mod s3;
mod storage;

use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::storage::ObjectStore;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::load();
    let store = s3::S3Client::from_config(&config).await;
    let state = AppState {
        store,
        prefix: config.prefix.clone(),
    };

    let app = routes::router::<s3::S3Client>()
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);
    tracing::info!("Bucket: {} (prefix {}/)", config.bucket, config.prefix);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Shared by every request: the bucket handle and the catalog root inside it.
#[derive(Clone)]
pub struct AppState<S: ObjectStore> {
    pub store: S,
    pub prefix: String,
}
