// Main entry point for the registrar API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use registrar_core::kernel::{HttpEmailService, RegistryAdapter, ServerDeps};
use registrar_core::{server::build_app, Config};
use registry_client::{RegistryClient, RegistryOptions};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,registrar_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting .gov registrar API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // External collaborators
    let registry = RegistryClient::new(RegistryOptions::new(
        config.registry_url.clone(),
        config.registry_client_id.clone(),
        config.registry_password.clone(),
    ))
    .context("Failed to create registry client")?;

    let email = HttpEmailService::new(
        config.email_api_url.clone(),
        config.email_api_key.clone(),
        config.email_from.clone(),
        Duration::from_secs(config.email_timeout_secs),
    )
    .context("Failed to create email client")?;

    let deps = ServerDeps::new(
        pool,
        Arc::new(email),
        Arc::new(RegistryAdapter::new(Arc::new(registry))),
    );

    // Build application
    let app = build_app(deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
