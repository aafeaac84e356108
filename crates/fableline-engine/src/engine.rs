//! The navigation engine: session state machine over story graphs.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use fableline_core::caller::CallerId;
use fableline_core::clock::Clock;
use fableline_core::error::GameError;
use fableline_core::id::{Digit, NodeId};
use fableline_core::session::{Session, SessionRepository};
use fableline_story::story::Story;
use fableline_story::{ChoiceTarget, StoryCatalog};

use crate::limiter::RateLimiter;
use crate::render::{self, CallerScript};

/// Spoken before re-reading the start node after an unrecoverable lookup.
const RECOVERY_NOTICE: &str = "Something went wrong. Let's start over.";

/// Spoken before repeating a node after an unmatched digit.
const INVALID_CHOICE_NOTICE: &str = "Sorry, that's not a valid option. Let me repeat the choices.";

/// Opening line of the story-selection menu.
const MENU_INTRO: &str = "Welcome to the adventure hotline! Please choose your story.";

/// Engine tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Per-caller limit for inbound calls within one window.
    pub call_limit: u32,
    /// Per-caller limit for digit presses within one window. Higher than
    /// the call limit: a caller presses many digits per call.
    pub digit_limit: u32,
    /// Rate-limit window length.
    pub limit_window: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            call_limit: 20,
            digit_limit: 30,
            limit_window: Duration::seconds(60),
        }
    }
}

/// The caller-facing result of one turn. This is the seam the transport
/// layer wraps; nothing else about the wire format belongs to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The narration to speak.
    pub prompt: String,
    /// Whether to collect a digit after speaking.
    pub expect_input: bool,
    /// Whether the interaction is over.
    pub end_call: bool,
}

impl TurnOutcome {
    fn speak(script: CallerScript) -> Self {
        let expect_input = script.expects_input();
        Self {
            prompt: script.text,
            expect_input,
            end_call: !expect_input,
        }
    }

    fn with_notice(notice: &str, script: CallerScript) -> Self {
        let mut outcome = Self::speak(script);
        outcome.prompt = format!("{notice} {}", outcome.prompt);
        outcome
    }

    fn gather(prompt: String) -> Self {
        Self {
            prompt,
            expect_input: true,
            end_call: false,
        }
    }
}

/// Maps an inbound call or digit press plus persisted session state to the
/// next story node and its caller script.
///
/// Storage and configuration failures never fail a turn: reads that error
/// count as "no session", writes that error are logged and swallowed, and
/// unresolvable stories or nodes reset the caller to `start`.
pub struct GameEngine {
    catalog: Arc<StoryCatalog>,
    sessions: Arc<dyn SessionRepository>,
    limiter: RateLimiter,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl GameEngine {
    /// Creates an engine over the given collaborators.
    #[must_use]
    pub fn new(
        catalog: Arc<StoryCatalog>,
        sessions: Arc<dyn SessionRepository>,
        limiter: RateLimiter,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            sessions,
            limiter,
            clock,
            config,
        }
    }

    /// Handles one turn: an inbound call when `digits` is `None`, a digit
    /// press otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCallerId`] for malformed caller
    /// identifiers and [`GameError::RateLimited`] when the caller exceeds
    /// their per-window limit. Every other failure mode produces a normal
    /// caller-facing outcome.
    pub async fn handle_turn(
        &self,
        caller: &str,
        digits: Option<&str>,
    ) -> Result<TurnOutcome, GameError> {
        let caller = CallerId::parse(caller)?;

        let limit = if digits.is_some() {
            self.config.digit_limit
        } else {
            self.config.call_limit
        };
        if !self
            .limiter
            .check(&caller, limit, self.config.limit_window)
        {
            return Err(GameError::RateLimited);
        }

        match digits {
            None => Ok(self.answer_call(&caller).await),
            Some(raw) => Ok(self.apply_digit(&caller, raw).await),
        }
    }

    /// Inbound call: resolve the caller's current position and speak it.
    async fn answer_call(&self, caller: &CallerId) -> TurnOutcome {
        let Some(mut session) = self.load_session(caller).await else {
            info!(caller = %caller, "new caller, offering story selection");
            let session = self.fresh_session(caller, NodeId::story_selection());
            self.save(&session).await;
            return self.selection_menu(None);
        };

        if let Some(story_id) = &session.story
            && let Err(err) = self.catalog.reload(story_id)
        {
            warn!(caller = %caller, story = %story_id, error = %err, "story reload failed");
        }

        if session.current_node.as_str() == NodeId::STORY_SELECTION {
            return self.selection_menu(None);
        }

        let story = self.story_for(&session);

        if session.current_node.as_str() != NodeId::START
            && session.current_node.as_str() != NodeId::CONTINUE_MENU
        {
            // Do not resume mid-game silently: stash the position and ask.
            info!(caller = %caller, node = %session.current_node, "returning caller, offering continue menu");
            session.previous_node = Some(session.current_node.clone());
            session.current_node = NodeId::continue_menu();
            session.updated_at = self.clock.now();
            self.save(&session).await;
        }
        // A caller who hung up in the menu itself keeps the stashed node.

        self.speak_current(&session, &story).await
    }

    /// Digit press: look up the transition for the caller's current state.
    async fn apply_digit(&self, caller: &CallerId, raw: &str) -> TurnOutcome {
        let digit = raw.trim().chars().next().and_then(Digit::new);

        let Some(session) = self.load_session(caller).await else {
            warn!(caller = %caller, "session lost, restarting");
            let session = self.fresh_session(caller, NodeId::start());
            self.save(&session).await;
            let story = self.catalog.load_default();
            return self.speak_current(&session, &story).await;
        };

        if session.current_node.as_str() == NodeId::STORY_SELECTION {
            return self.select_story(session, digit).await;
        }

        let story = self.story_for(&session);
        let Some(node) = story.node(&session.current_node) else {
            return self.recover_to_start(session, &story).await;
        };

        let Some(target) = digit.and_then(|d| node.choice(d)).cloned() else {
            info!(caller = %caller, digit = ?raw, node = %session.current_node, "invalid choice");
            return TurnOutcome::with_notice(INVALID_CHOICE_NOTICE, render::script_for(node));
        };

        match target {
            ChoiceTarget::StorySelection => {
                info!(caller = %caller, "returning to story selection");
                let mut session = session;
                session.current_node = NodeId::story_selection();
                session.previous_node = None;
                session.updated_at = self.clock.now();
                self.save(&session).await;
                self.selection_menu(None)
            }
            ChoiceTarget::ContinueGame => {
                let resume = session.previous_node.clone().unwrap_or_else(|| {
                    warn!(caller = %caller, "no stashed node to continue, starting over");
                    NodeId::start()
                });
                info!(caller = %caller, node = %resume, "continuing game");
                self.advance_to(session, &story, resume).await
            }
            ChoiceTarget::Node(next) => self.advance_to(session, &story, next).await,
        }
    }

    /// Story-selection menu: the digit is a 1-based index into the catalog
    /// listing.
    async fn select_story(&self, mut session: Session, digit: Option<Digit>) -> TurnOutcome {
        let selected = digit.and_then(|d| self.catalog.story_at(usize::from(d.value())));
        let Some(story_id) = selected else {
            info!(caller = %session.caller_id, "invalid story selection");
            return self.selection_menu(Some(INVALID_CHOICE_NOTICE));
        };

        info!(caller = %session.caller_id, story = %story_id, "story selected");
        if let Err(err) = self.catalog.reload(&story_id) {
            warn!(story = %story_id, error = %err, "story reload failed");
        }
        let story = self.catalog.load_or_default(&story_id);

        session.story = Some(story_id);
        session.current_node = NodeId::start();
        session.previous_node = None;
        session.updated_at = self.clock.now();
        self.save(&session).await;

        self.speak_current(&session, &story).await
    }

    /// Moves the session to `next` and speaks it. Terminal nodes end the
    /// game and delete the session.
    async fn advance_to(&self, mut session: Session, story: &Story, next: NodeId) -> TurnOutcome {
        match story.node(&next) {
            None => {
                warn!(caller = %session.caller_id, node = %next, "choice target missing from story");
                self.recover_to_start(session, story).await
            }
            Some(node) if node.is_terminal() => {
                info!(caller = %session.caller_id, node = %next, "game over");
                self.remove(&session.caller_id).await;
                TurnOutcome::speak(render::script_for(node))
            }
            Some(node) => {
                info!(caller = %session.caller_id, from = %session.current_node, to = %next, "advancing");
                session.current_node = next;
                session.updated_at = self.clock.now();
                self.save(&session).await;
                TurnOutcome::speak(render::script_for(node))
            }
        }
    }

    /// Speaks the session's current node, deleting the session when the
    /// node is terminal.
    async fn speak_current(&self, session: &Session, story: &Story) -> TurnOutcome {
        match story.node(&session.current_node) {
            None => self.recover_to_start(session.clone(), story).await,
            Some(node) if node.is_terminal() => {
                info!(caller = %session.caller_id, node = %session.current_node, "game over");
                self.remove(&session.caller_id).await;
                TurnOutcome::speak(render::script_for(node))
            }
            Some(node) => TurnOutcome::speak(render::script_for(node)),
        }
    }

    /// Unrecoverable lookup: reset the session to `start` and re-prompt.
    async fn recover_to_start(&self, mut session: Session, story: &Story) -> TurnOutcome {
        warn!(caller = %session.caller_id, node = %session.current_node, "unknown node, resetting to start");
        session.current_node = NodeId::start();
        session.previous_node = None;
        session.updated_at = self.clock.now();
        self.save(&session).await;

        let start = story
            .node(&NodeId::start())
            .expect("validated story always has a start node");
        TurnOutcome::with_notice(RECOVERY_NOTICE, render::script_for(start))
    }

    fn selection_menu(&self, notice: Option<&str>) -> TurnOutcome {
        let mut text = String::new();
        if let Some(notice) = notice {
            write!(text, "{notice} ").expect("writing to a String cannot fail");
        }
        text.push_str(MENU_INTRO);
        for (index, info) in self.catalog.list().iter().enumerate() {
            write!(text, " Press {} for {}.", index + 1, info.name)
                .expect("writing to a String cannot fail");
        }
        TurnOutcome::gather(text)
    }

    /// The session's story, or the default story when none is selected or
    /// the selection no longer resolves.
    fn story_for(&self, session: &Session) -> Arc<Story> {
        session.story.as_ref().map_or_else(
            || self.catalog.load_default(),
            |id| self.catalog.load_or_default(id),
        )
    }

    fn fresh_session(&self, caller: &CallerId, node: NodeId) -> Session {
        Session {
            caller_id: caller.clone(),
            current_node: node,
            previous_node: None,
            story: None,
            updated_at: self.clock.now(),
        }
    }

    async fn load_session(&self, caller: &CallerId) -> Option<Session> {
        match self.sessions.get(caller).await {
            Ok(found) => found,
            Err(err) => {
                warn!(caller = %caller, error = %err, "session read failed, treating as no session");
                None
            }
        }
    }

    async fn save(&self, session: &Session) {
        if let Err(err) = self.sessions.upsert(session).await {
            warn!(caller = %session.caller_id, error = %err, "session write failed, progress not persisted");
        }
    }

    async fn remove(&self, caller: &CallerId) {
        if let Err(err) = self.sessions.delete(caller).await {
            warn!(caller = %caller, error = %err, "session delete failed");
        }
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
