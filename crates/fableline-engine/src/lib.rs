//! Fableline — Navigation Engine.
//!
//! Maps an inbound call or digit press plus persisted session state to the
//! next story node. The engine is deliberately lenient: availability of the
//! call experience is prioritized over correctness of session continuity,
//! so storage and configuration failures degrade to the restart-from-
//! beginning path instead of failing the call.

pub mod engine;
pub mod limiter;
pub mod render;

pub use engine::{EngineConfig, GameEngine, TurnOutcome};
pub use limiter::RateLimiter;
