//! Fableline API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use fableline_api::config::ApiConfig;
use fableline_api::error::AppError;
use fableline_api::{routes, state};
use fableline_core::clock::{Clock, SystemClock};
use fableline_core::session::SessionRepository;
use fableline_engine::{EngineConfig, GameEngine, RateLimiter};
use fableline_store::PgSessionRepository;
use fableline_story::StoryCatalog;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Fableline API server");

    let config = ApiConfig::from_env()?;

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    // Build the engine and its collaborators.
    let sessions: Arc<dyn SessionRepository> = Arc::new(PgSessionRepository::new(pool));
    let catalog = Arc::new(
        StoryCatalog::builtin(config.default_story.clone())
            .map_err(|e| AppError::Config(e.to_string()))?,
    );
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let limiter = RateLimiter::new(Arc::clone(&clock), config.limiter_capacity);
    let engine = Arc::new(GameEngine::new(
        Arc::clone(&catalog),
        Arc::clone(&sessions),
        limiter,
        clock,
        EngineConfig {
            call_limit: config.call_limit,
            digit_limit: config.digit_limit,
            limit_window: chrono::Duration::seconds(config.limit_window_secs),
        },
    ));

    let app_state = state::AppState::new(engine, catalog, sessions, config.debug_token.clone());

    // Build router.
    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::voice::router())
        .merge(routes::choice::router())
        .merge(routes::debug::router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
