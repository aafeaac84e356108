//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use fableline_api::routes;
use fableline_api::state::AppState;
use fableline_core::clock::Clock;
use fableline_core::id::StoryId;
use fableline_core::session::SessionRepository;
use fableline_engine::{EngineConfig, GameEngine, RateLimiter};
use fableline_story::StoryCatalog;
use fableline_test_support::{FixedClock, InMemorySessionRepository};

/// Build the full app router over an in-memory session repository and a
/// deterministic clock. Uses the same route structure as `main.rs`.
pub fn build_test_app(sessions: Arc<InMemorySessionRepository>) -> Router {
    let catalog = Arc::new(StoryCatalog::builtin(StoryId::from("mystic-forest")).unwrap());
    let clock: Arc<dyn Clock> =
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()));
    let limiter = RateLimiter::new(Arc::clone(&clock), 64);
    let engine = Arc::new(GameEngine::new(
        Arc::clone(&catalog),
        Arc::clone(&sessions) as Arc<dyn SessionRepository>,
        limiter,
        clock,
        EngineConfig::default(),
    ));
    let app_state = AppState::new(
        engine,
        catalog,
        sessions as Arc<dyn SessionRepository>,
        Some("test-token".to_owned()),
    );

    Router::new()
        .merge(routes::health::router())
        .merge(routes::voice::router())
        .merge(routes::choice::router())
        .merge(routes::debug::router())
        .with_state(app_state)
}

/// Send an urlencoded webhook POST and return status and TwiML body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}
