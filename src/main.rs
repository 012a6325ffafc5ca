use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use typerspace_scores::{
    config::ServerConfig,
    kv::{InMemoryKeyValueBackend, KeyValueBackend, KvError, PostgresKeyValueBackend},
    proxy,
    shared::AppState,
};

/// Picks Postgres when a database is configured, in-memory storage otherwise
async fn storage_backend(config: &ServerConfig) -> Result<Arc<dyn KeyValueBackend>, KvError> {
    match &config.database_url {
        Some(url) => {
            let backend = PostgresKeyValueBackend::connect(url).await?;
            backend.ensure_schema().await?;
            info!("Using PostgreSQL key-value storage");
            Ok(Arc::new(backend))
        }
        None => {
            warn!("DATABASE_URL not set, values are kept in memory only");
            Ok(Arc::new(InMemoryKeyValueBackend::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "typerspace_scores=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TyperSpace key-value service");

    let config = ServerConfig::from_env();
    let store = storage_backend(&config).await.map_err(|e| {
        error!(error = %e, "Failed to initialise storage");
        e
    })?;

    if config.auth_token.is_some() {
        info!("Bearer token required on storage routes");
    }
    let state = AppState::new(store).with_auth_token(config.auth_token.clone());

    let app = proxy::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    info!(addr = %config.bind_addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
