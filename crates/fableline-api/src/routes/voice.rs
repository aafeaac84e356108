//! Inbound-call webhook.

use axum::extract::State;
use axum::{Form, Router, routing::post};
use serde::Deserialize;
use tracing::{instrument, warn};
use uuid::Uuid;

use fableline_core::error::GameError;

use crate::routes::{VOICE_PATH, script_response};
use crate::state::AppState;
use crate::twiml::VoiceResponse;

/// Webhook payload for an inbound call.
#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    /// The caller's number.
    #[serde(rename = "From")]
    pub from: Option<String>,
}

/// POST /voice
#[instrument(skip(state, form), fields(caller = ?form.from, correlation_id = %Uuid::new_v4()))]
async fn voice(State(state): State<AppState>, Form(form): Form<VoiceRequest>) -> VoiceResponse {
    let caller = form.from.unwrap_or_default();

    match state.engine.handle_turn(&caller, None).await {
        Ok(outcome) => script_response(&outcome),
        Err(GameError::InvalidCallerId) => {
            warn!("rejecting call with malformed caller id");
            let mut twiml = VoiceResponse::new();
            twiml
                .say("Sorry, there was an issue with your phone number.")
                .hangup();
            twiml
        }
        Err(GameError::RateLimited) => {
            let mut twiml = VoiceResponse::new();
            twiml
                .say("You're calling too frequently. Please wait a moment and try again.")
                .hangup();
            twiml
        }
        Err(err) => {
            warn!(error = %err, "turn failed");
            let mut twiml = VoiceResponse::new();
            twiml
                .say("Sorry, something went wrong. Please try calling back.")
                .hangup();
            twiml
        }
    }
}

/// Returns the inbound-call router.
pub fn router() -> Router<AppState> {
    Router::new().route(VOICE_PATH, post(voice))
}
