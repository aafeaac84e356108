//! `PostgreSQL` implementation of the `SessionRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::warn;

use fableline_core::caller::CallerId;
use fableline_core::error::GameError;
use fableline_core::id::{NodeId, StoryId};
use fableline_core::session::{Session, SessionRepository};

/// PostgreSQL-backed session repository over the `user_sessions` table.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Creates a new `PgSessionRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: &sqlx::Error) -> GameError {
    GameError::SessionStore(err.to_string())
}

fn session_from_row(caller_id: CallerId, row: &sqlx::postgres::PgRow) -> Session {
    let current_node: String = row.get("current_node");
    let previous_node: Option<String> = row.get("previous_node");
    let story_name: Option<String> = row.get("story_name");
    let updated_at: DateTime<Utc> = row.get("updated_at");

    Session {
        caller_id,
        current_node: NodeId::new(current_node),
        previous_node: previous_node.map(NodeId::new),
        story: story_name.map(StoryId::new),
        updated_at,
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn get(&self, caller: &CallerId) -> Result<Option<Session>, GameError> {
        let row = sqlx::query(
            r"
            SELECT current_node, previous_node, story_name, updated_at
            FROM user_sessions
            WHERE caller_id = $1
            ",
        )
        .bind(caller.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(&e))?;

        Ok(row.map(|row| session_from_row(caller.clone(), &row)))
    }

    async fn upsert(&self, session: &Session) -> Result<(), GameError> {
        sqlx::query(
            r"
            INSERT INTO user_sessions (caller_id, current_node, previous_node, story_name, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (caller_id)
            DO UPDATE SET
                current_node  = EXCLUDED.current_node,
                previous_node = EXCLUDED.previous_node,
                story_name    = EXCLUDED.story_name,
                updated_at    = EXCLUDED.updated_at
            ",
        )
        .bind(session.caller_id.as_str())
        .bind(session.current_node.as_str())
        .bind(session.previous_node.as_ref().map(NodeId::as_str))
        .bind(session.story.as_ref().map(StoryId::as_str))
        .bind(session.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(&e))?;

        Ok(())
    }

    async fn delete(&self, caller: &CallerId) -> Result<(), GameError> {
        sqlx::query("DELETE FROM user_sessions WHERE caller_id = $1")
            .bind(caller.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(&e))?;

        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Session>, GameError> {
        let rows = sqlx::query(
            r"
            SELECT caller_id, current_node, previous_node, story_name, updated_at
            FROM user_sessions
            ORDER BY updated_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(&e))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in rows {
            let raw_caller: String = row.get("caller_id");
            let Ok(caller_id) = CallerId::parse(&raw_caller) else {
                warn!(caller = %raw_caller, "skipping session row with malformed caller id");
                continue;
            };
            sessions.push(session_from_row(caller_id, &row));
        }

        Ok(sessions)
    }
}
