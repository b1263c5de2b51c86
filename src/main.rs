//! Service entry point: configuration, database pool, router, listener.

use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use podcast_paywall::adapters::http::{api_router, AppState};
use podcast_paywall::adapters::postgres::{
    PostgresPodcastReader, PostgresPricingReader, PostgresTransactionRepository,
    PostgresUserRepository,
};
use podcast_paywall::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    if !config.payment.is_signing_enabled() {
        tracing::warn!("payment secret not configured, links and webhooks run unsigned");
    }

    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        podcasts: Arc::new(PostgresPodcastReader::new(pool.clone())),
        transactions: Arc::new(PostgresTransactionRepository::new(pool.clone())),
        pricing: Arc::new(PostgresPricingReader::new(pool)),
        payment: config.payment.clone(),
        telegram: config.telegram.clone(),
    };

    let app = Router::new()
        .nest("/api", api_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
