//! Shared application state.

use std::sync::Arc;

use fableline_core::session::SessionRepository;
use fableline_engine::GameEngine;
use fableline_story::StoryCatalog;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The navigation engine behind the webhook routes.
    pub engine: Arc<GameEngine>,
    /// Story catalog, exposed read-only on the debug surface.
    pub catalog: Arc<StoryCatalog>,
    /// Session store, used by the debug surface only.
    pub sessions: Arc<dyn SessionRepository>,
    /// Bearer token gating `/debug`; `None` disables the endpoint.
    pub debug_token: Option<String>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        engine: Arc<GameEngine>,
        catalog: Arc<StoryCatalog>,
        sessions: Arc<dyn SessionRepository>,
        debug_token: Option<String>,
    ) -> Self {
        Self {
            engine,
            catalog,
            sessions,
            debug_token,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.engine)
            .field("catalog", &self.catalog)
            .field("debug_token", &self.debug_token.is_some())
            .finish_non_exhaustive()
    }
}
