//! Fableline webhook API.
//!
//! Wraps the navigation engine's `handle_turn` seam in the telephony
//! webhook surface: TwiML responses for `/voice` and `/handle-choice`,
//! plus JSON health and debug endpoints.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod twiml;
