//! Webhook and operator routes.

pub mod choice;
pub mod debug;
pub mod health;
pub mod voice;

use fableline_engine::render;
use fableline_engine::TurnOutcome;

use crate::twiml::VoiceResponse;

/// Path of the inbound-call webhook.
pub const VOICE_PATH: &str = "/voice";

/// Path of the digit-press webhook.
pub const CHOICE_PATH: &str = "/handle-choice";

/// Seconds of silence inserted before the repeat prompt.
const PROMPT_PAUSE_SECS: u8 = 2;

/// Renders a turn outcome as TwiML: speak the prompt, then either gather
/// one digit (repeating the prompt on silence) or hang up.
pub(crate) fn script_response(outcome: &TurnOutcome) -> VoiceResponse {
    let mut twiml = VoiceResponse::new();
    twiml.say(&outcome.prompt);

    if outcome.expect_input {
        twiml
            .gather(CHOICE_PATH, 1, render::GATHER_TIMEOUT_SECS)
            .pause(PROMPT_PAUSE_SECS)
            .say(render::RETRY_PROMPT)
            .redirect(VOICE_PATH);
    } else {
        twiml.hangup();
    }

    twiml
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for route tests.

    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use fableline_core::clock::Clock;
    use fableline_core::id::StoryId;
    use fableline_core::session::SessionRepository;
    use fableline_engine::{EngineConfig, GameEngine, RateLimiter};
    use fableline_story::StoryCatalog;
    use fableline_test_support::FixedClock;

    use crate::state::AppState;

    /// Builds app state over an in-memory session repository.
    pub fn app_state(
        sessions: Arc<dyn SessionRepository>,
        config: EngineConfig,
        debug_token: Option<String>,
    ) -> AppState {
        let catalog = Arc::new(StoryCatalog::builtin(StoryId::from("mystic-forest")).unwrap());
        let clock: Arc<dyn Clock> =
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()));
        let limiter = RateLimiter::new(Arc::clone(&clock), 64);
        let engine = Arc::new(GameEngine::new(
            Arc::clone(&catalog),
            Arc::clone(&sessions),
            limiter,
            clock,
            config,
        ));
        AppState::new(engine, catalog, sessions, debug_token)
    }

    /// Sends an urlencoded webhook POST and returns status and body text.
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
}
