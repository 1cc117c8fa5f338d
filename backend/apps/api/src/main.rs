//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are
//! `fleet::FleetError` rendered as HTML pages.

use anyhow::Context;
use axum::Router;
use fleet::{FleetConfig, PgFleetRepository, Views, fleet_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,fleet=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
        Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(max_connections, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Fleet configuration
    let fleet_config = if cfg!(debug_assertions) {
        FleetConfig::development()
    } else {
        FleetConfig::default()
    };

    let views = Views::new().context("Failed to parse templates")?;
    let fleet_store = PgFleetRepository::new(pool);

    // Build router
    let app = Router::new()
        .merge(fleet_router(fleet_store, views, fleet_config))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("BIND_ADDR is not a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
