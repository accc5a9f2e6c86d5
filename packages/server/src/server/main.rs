// Main entry point for API server

use anyhow::{Context, Result};
use directory_core::kernel::{connect, ServerDeps, MIGRATOR};
use directory_core::server::middleware::RateLimit;
use directory_core::{domains::accounts::JwtService, server::build_app, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,directory_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting healthcare resource directory API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    tracing::info!("Connecting to database...");
    let pool = connect(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    tracing::info!("Running database migrations...");
    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));
    let deps = ServerDeps::with_defaults(pool, jwt_service);

    let outcome = deps
        .schema_guard
        .ensure_counter_column()
        .await
        .context("Failed to verify resource counter column")?;
    tracing::info!(outcome = ?outcome, "Schema guard complete");

    let rate_limit = RateLimit::new(
        config.rate_limit_max_requests,
        std::time::Duration::from_secs(config.rate_limit_window_secs),
    );
    let app = build_app(deps, &config.allowed_origins, rate_limit);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    // Peer addresses feed the per-IP rate limiter when no proxy header is set
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
