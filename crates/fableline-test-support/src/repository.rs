//! Test repositories — mock `SessionRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use fableline_core::caller::CallerId;
use fableline_core::error::GameError;
use fableline_core::session::{Session, SessionRepository};

/// A fully functional in-memory session repository backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<CallerId, Session>>,
}

impl InMemorySessionRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with sessions.
    #[must_use]
    pub fn with_sessions(sessions: impl IntoIterator<Item = Session>) -> Self {
        Self {
            sessions: Mutex::new(
                sessions
                    .into_iter()
                    .map(|s| (s.caller_id.clone(), s))
                    .collect(),
            ),
        }
    }

    /// Returns the number of stored sessions.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Whether no sessions are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, caller: &CallerId) -> Result<Option<Session>, GameError> {
        Ok(self.sessions.lock().unwrap().get(caller).cloned())
    }

    async fn upsert(&self, session: &Session) -> Result<(), GameError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.caller_id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, caller: &CallerId) -> Result<(), GameError> {
        self.sessions.lock().unwrap().remove(caller);
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Session>, GameError> {
        let mut sessions: Vec<Session> = self.sessions.lock().unwrap().values().cloned().collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sessions.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(sessions)
    }
}

/// A session repository on which every operation fails. Useful for testing
/// the degrade-to-restart policy.
#[derive(Debug, Default)]
pub struct FailingSessionRepository;

fn unavailable() -> GameError {
    GameError::SessionStore("connection refused".to_owned())
}

#[async_trait]
impl SessionRepository for FailingSessionRepository {
    async fn get(&self, _caller: &CallerId) -> Result<Option<Session>, GameError> {
        Err(unavailable())
    }

    async fn upsert(&self, _session: &Session) -> Result<(), GameError> {
        Err(unavailable())
    }

    async fn delete(&self, _caller: &CallerId) -> Result<(), GameError> {
        Err(unavailable())
    }

    async fn list_recent(&self, _limit: i64) -> Result<Vec<Session>, GameError> {
        Err(unavailable())
    }
}
