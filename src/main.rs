mod auth;
mod config;
mod db;
mod domain;
mod error;
mod extractors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod startup;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use auth::{JwksCache, KeyProvider};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use handlers::MetricsState;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub key_provider: Arc<dyn KeyProvider>,
    pub config: AppConfig,
    pub metrics: Arc<MetricsState>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables before reading LOG_FORMAT / RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing with conditional JSON/text output
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,slumber_api=debug,tower_http=debug".into());

    if use_json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Human-readable for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    handlers::debug::mark_started();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    // Create database pool
    let db = db::create_pool(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to create database pool: {}", e);
        e
    })?;

    tracing::info!("Database pool created successfully");

    if config.run_migrations {
        db::run_migrations(&db).await.map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            e
        })?;
        tracing::info!("Database migrations applied");
    }

    // Initialize metrics recorder
    let metrics_state = Arc::new(handlers::setup_metrics_recorder().map_err(|e| {
        tracing::error!("Failed to install metrics recorder: {}", e);
        e
    })?);
    tracing::info!("Metrics recorder initialized");

    // Signing keys for access tokens, cached for an hour
    let key_provider: Arc<dyn KeyProvider> = Arc::new(JwksCache::new(config.jwks_url()));
    if config.jwt_secret.is_some() {
        tracing::info!("HS256 shared-secret verification enabled");
    }

    let bind_addr = config.bind_addr.clone();

    // Create application state
    let state = Arc::new(AppState {
        db,
        key_provider,
        config,
        metrics: metrics_state,
    });

    // Build router
    let app = startup::build_router(state).map_err(|e| {
        tracing::error!("Failed to build router: {}", e);
        e
    })?;

    // Start server
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
