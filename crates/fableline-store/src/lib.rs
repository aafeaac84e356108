//! Fableline — PostgreSQL session store.
//!
//! Implements the `SessionRepository` seam over a single `user_sessions`
//! table keyed by caller identifier.

pub mod pg_session_repository;
pub mod schema;

pub use pg_session_repository::PgSessionRepository;
