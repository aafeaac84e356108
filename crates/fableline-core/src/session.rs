//! Caller session model and persistence seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::caller::CallerId;
use crate::error::GameError;
use crate::id::{NodeId, StoryId};

/// Persisted progress for one caller. One row per caller, upserted by
/// caller identifier and deleted when the story reaches a terminal node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The caller this session belongs to.
    pub caller_id: CallerId,
    /// The caller's current position: a story node id or a control state.
    pub current_node: NodeId,
    /// Stashed position while the caller sits in the continue menu.
    pub previous_node: Option<NodeId>,
    /// The story the caller selected, if any.
    pub story: Option<StoryId>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

/// Persistence seam for caller sessions.
///
/// All operations are fallible. Consumers must treat a failed read as "no
/// session" and a failed write as "the write did not happen" — failures
/// degrade the caller to the restart-from-beginning path and are never
/// surfaced to the caller-facing flow.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the session for a caller, if one exists.
    async fn get(&self, caller: &CallerId) -> Result<Option<Session>, GameError>;

    /// Inserts or fully replaces the session row for `session.caller_id`.
    async fn upsert(&self, session: &Session) -> Result<(), GameError>;

    /// Deletes the session for a caller. Deleting a missing session is not
    /// an error.
    async fn delete(&self, caller: &CallerId) -> Result<(), GameError>;

    /// Returns the most recently updated sessions, newest first.
    ///
    /// Operator-facing: consumed by the debug surface only, never by the
    /// navigation engine.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Session>, GameError>;
}
