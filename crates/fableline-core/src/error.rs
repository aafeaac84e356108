//! Domain error types.

use thiserror::Error;

use crate::id::{NodeId, StoryId};

/// Top-level domain error type.
///
/// No variant is fatal to a call: the navigation engine absorbs
/// `SessionStore`, `UnknownStory`, and `UnknownNode` by degrading to the
/// restart-from-beginning path, and the webhook layer turns the remaining
/// variants into caller-facing scripts.
#[derive(Debug, Error)]
pub enum GameError {
    /// The inbound caller identifier is malformed.
    #[error("invalid caller identifier")]
    InvalidCallerId,

    /// The caller exceeded the per-caller request limit.
    #[error("rate limit exceeded for caller")]
    RateLimited,

    /// The session store failed to read or write.
    #[error("session store error: {0}")]
    SessionStore(String),

    /// A story identifier did not resolve in the catalog.
    #[error("unknown story: {0}")]
    UnknownStory(StoryId),

    /// A node identifier did not resolve in the loaded story.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// Invalid startup or runtime configuration.
    #[error("configuration error: {0}")]
    Config(String),
}
