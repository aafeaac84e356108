//! Session store database schema.

/// SQL to create the sessions table.
pub const CREATE_SESSIONS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS user_sessions (
    caller_id     TEXT PRIMARY KEY,
    current_node  TEXT NOT NULL,
    previous_node TEXT,
    story_name    TEXT,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at    TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_user_sessions_updated_at
    ON user_sessions (updated_at DESC);
";
