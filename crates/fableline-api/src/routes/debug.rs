//! Operator debug endpoint.
//!
//! Gated behind a bearer token; disabled entirely when no token is
//! configured.

use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::instrument;

use fableline_core::session::Session;

use crate::error::ApiError;
use crate::state::AppState;

/// Number of sessions shown in the dump.
const SESSION_LIMIT: i64 = 10;

/// Catalog summary of one registered story.
#[derive(Debug, Serialize)]
pub struct StorySummary {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Authoring version.
    pub version: String,
    /// SHA-256 digest of the story content.
    pub digest: String,
}

/// Debug dump: recent sessions and the registered stories.
#[derive(Debug, Serialize)]
pub struct DebugResponse {
    /// Most recently updated sessions, newest first.
    pub sessions: Vec<Session>,
    /// Number of sessions returned.
    pub count: usize,
    /// Registered stories.
    pub stories: Vec<StorySummary>,
}

/// GET /debug
#[instrument(skip(state, headers))]
async fn debug_dump(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DebugResponse>, ApiError> {
    let Some(expected) = &state.debug_token else {
        return Err(ApiError::DebugNotConfigured);
    };

    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if provided != Some(format!("Bearer {expected}").as_str()) {
        return Err(ApiError::Unauthorized);
    }

    let sessions = state.sessions.list_recent(SESSION_LIMIT).await?;

    let stories = state
        .catalog
        .list()
        .into_iter()
        .map(|info| {
            let digest = state
                .catalog
                .load(&info.id)
                .map(|story| story.content_digest())
                .unwrap_or_default();
            StorySummary {
                id: info.id.as_str().to_owned(),
                name: info.name,
                version: info.version,
                digest,
            }
        })
        .collect();

    Ok(Json(DebugResponse {
        count: sessions.len(),
        sessions,
        stories,
    }))
}

/// Returns the debug router.
pub fn router() -> Router<AppState> {
    Router::new().route("/debug", get(debug_dump))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use fableline_core::caller::CallerId;
    use fableline_core::id::{NodeId, StoryId};
    use fableline_core::session::Session;
    use fableline_engine::EngineConfig;
    use fableline_test_support::InMemorySessionRepository;

    use crate::routes::testing::app_state;

    async fn get_debug(
        state: crate::state::AppState,
        auth: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let app = router().with_state(state);
        let mut builder = Request::builder().method("GET").uri("/debug");
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        (status, json)
    }

    fn populated_state(debug_token: Option<String>) -> crate::state::AppState {
        let sessions = Arc::new(InMemorySessionRepository::with_sessions([Session {
            caller_id: CallerId::parse("+15551234567").unwrap(),
            current_node: NodeId::from("meadow"),
            previous_node: None,
            story: Some(StoryId::from("mystic-forest")),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
        }]));
        app_state(sessions, EngineConfig::default(), debug_token)
    }

    #[tokio::test]
    async fn test_unconfigured_debug_endpoint_returns_503() {
        let (status, json) = get_debug(populated_state(None), Some("Bearer anything")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "not_configured");
    }

    #[tokio::test]
    async fn test_missing_or_wrong_token_returns_401() {
        let state = populated_state(Some("sekrit".to_owned()));

        let (status, _) = get_debug(state.clone(), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, json) = get_debug(state, Some("Bearer wrong")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_authorized_dump_lists_sessions_and_stories() {
        let state = populated_state(Some("sekrit".to_owned()));

        let (status, json) = get_debug(state, Some("Bearer sekrit")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 1);
        assert_eq!(json["sessions"][0]["caller_id"], "+15551234567");
        assert_eq!(json["sessions"][0]["current_node"], "meadow");

        let stories = json["stories"].as_array().unwrap();
        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0]["id"], "mystic-forest");
        assert_eq!(stories[0]["digest"].as_str().unwrap().len(), 64);
    }
}
