//! Digit-press webhook.

use axum::extract::State;
use axum::{Form, Router, routing::post};
use serde::Deserialize;
use tracing::{instrument, warn};
use uuid::Uuid;

use fableline_core::error::GameError;

use crate::routes::{CHOICE_PATH, VOICE_PATH, script_response};
use crate::state::AppState;
use crate::twiml::VoiceResponse;

/// Webhook payload for a digit press.
#[derive(Debug, Deserialize)]
pub struct ChoiceRequest {
    /// The caller's number.
    #[serde(rename = "From")]
    pub from: Option<String>,
    /// The gathered digits.
    #[serde(rename = "Digits")]
    pub digits: Option<String>,
}

/// POST /handle-choice
#[instrument(
    skip(state, form),
    fields(caller = ?form.from, digits = ?form.digits, correlation_id = %Uuid::new_v4())
)]
async fn handle_choice(
    State(state): State<AppState>,
    Form(form): Form<ChoiceRequest>,
) -> VoiceResponse {
    let caller = form.from.unwrap_or_default();
    let digits = form.digits.unwrap_or_default();

    match state.engine.handle_turn(&caller, Some(&digits)).await {
        Ok(outcome) => script_response(&outcome),
        Err(GameError::InvalidCallerId) => {
            warn!("rejecting digit press with malformed caller id");
            let mut twiml = VoiceResponse::new();
            twiml
                .say("Sorry, there was an issue with your phone number.")
                .hangup();
            twiml
        }
        Err(GameError::RateLimited) => {
            // Digit floods redirect back to the narration instead of
            // dropping the call.
            let mut twiml = VoiceResponse::new();
            twiml
                .say("You're pressing buttons too quickly. Please wait a moment.")
                .redirect(VOICE_PATH);
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

/// Returns the digit-press router.
pub fn router() -> Router<AppState> {
    Router::new().route(CHOICE_PATH, post(handle_choice))
}
