//! Shared test mocks and utilities for the Fableline adventure engine.

mod clock;
mod repository;

pub use clock::{FixedClock, SteppingClock};
pub use repository::{FailingSessionRepository, InMemorySessionRepository};
