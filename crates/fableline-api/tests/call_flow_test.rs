//! End-to-end webhook flow: a caller plays a story from first contact to
//! an ending across several requests, exactly as the telephony collaborator
//! would deliver them.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;

use fableline_test_support::InMemorySessionRepository;

const CALL: &str = "From=%2B15551234567";

#[tokio::test]
async fn test_full_game_from_first_call_to_ending() {
    let sessions = Arc::new(InMemorySessionRepository::new());

    // First contact: the caller is offered the story selection menu.
    let app = common::build_test_app(Arc::clone(&sessions));
    let (status, body) = common::post_form(app, "/voice", CALL).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Press 1 for Mystic Forest Adventure."));

    // Select the forest story: the adventure starts at the crossroads.
    let app = common::build_test_app(Arc::clone(&sessions));
    let (_, body) = common::post_form(app, "/handle-choice", &format!("{CALL}&Digits=1")).await;
    assert!(body.contains("crossroads"));

    // Head to the meadow.
    let app = common::build_test_app(Arc::clone(&sessions));
    let (_, body) = common::post_form(app, "/handle-choice", &format!("{CALL}&Digits=2")).await;
    assert!(body.contains("sunny meadow"));

    // The caller hangs up and dials back in: progress is not resumed
    // silently.
    let app = common::build_test_app(Arc::clone(&sessions));
    let (_, body) = common::post_form(app, "/voice", CALL).await;
    assert!(body.contains("middle of an adventure"));

    // Continue where they left off.
    let app = common::build_test_app(Arc::clone(&sessions));
    let (_, body) = common::post_form(app, "/handle-choice", &format!("{CALL}&Digits=1")).await;
    assert!(body.contains("sunny meadow"));

    // Pick the flowers: the game ends, the call hangs up, and the session
    // is gone.
    let app = common::build_test_app(Arc::clone(&sessions));
    let (_, body) = common::post_form(app, "/handle-choice", &format!("{CALL}&Digits=1")).await;
    assert!(body.contains("You win!"));
    assert!(body.contains("<Hangup/>"));
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn test_switching_stories_restarts_from_selection() {
    let sessions = Arc::new(InMemorySessionRepository::new());

    // Enter the selection menu and pick the space story.
    let app = common::build_test_app(Arc::clone(&sessions));
    common::post_form(app, "/voice", CALL).await;

    let app = common::build_test_app(Arc::clone(&sessions));
    let (_, body) = common::post_form(app, "/handle-choice", &format!("{CALL}&Digits=2")).await;
    assert!(body.contains("Welcome to Space Adventure!"));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = common::build_test_app(Arc::new(InMemorySessionRepository::new()));

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/nonexistent")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
