//! Story and node model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use fableline_core::id::{Digit, NodeId, StoryId};

/// Where a digit press leads from a node: another node in the same story,
/// or one of the sentinel transitions the navigation engine interprets
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChoiceTarget {
    /// Move to another node in the same story.
    Node(NodeId),
    /// Restore the caller's stashed `previous_node`.
    ContinueGame,
    /// Return the caller to the story-selection menu.
    StorySelection,
}

/// Serialized name of the continue-game sentinel.
const CONTINUE_GAME: &str = "continue_game";

impl From<String> for ChoiceTarget {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            CONTINUE_GAME => Self::ContinueGame,
            NodeId::STORY_SELECTION => Self::StorySelection,
            _ => Self::Node(NodeId::new(raw)),
        }
    }
}

impl From<ChoiceTarget> for String {
    fn from(target: ChoiceTarget) -> Self {
        match target {
            ChoiceTarget::Node(id) => id.as_str().to_owned(),
            ChoiceTarget::ContinueGame => CONTINUE_GAME.to_owned(),
            ChoiceTarget::StorySelection => NodeId::STORY_SELECTION.to_owned(),
        }
    }
}

impl fmt::Display for ChoiceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => f.write_str(id.as_str()),
            Self::ContinueGame => f.write_str(CONTINUE_GAME),
            Self::StorySelection => f.write_str(NodeId::STORY_SELECTION),
        }
    }
}

/// One narrative beat: a spoken prompt plus zero or more digit-keyed
/// transitions. A node with no choices is terminal — reaching it ends the
/// game and the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryNode {
    /// The prompt read to the caller.
    pub text: String,
    /// Digit-keyed transitions out of this node.
    #[serde(default)]
    pub choices: BTreeMap<Digit, ChoiceTarget>,
}

impl StoryNode {
    /// Creates a node from a prompt and `(digit, target)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if a choice key is not a DTMF digit. Nodes are authored in
    /// code; a bad key is a defect caught by the story's own tests.
    #[must_use]
    pub fn new(text: &str, choices: &[(char, &str)]) -> Self {
        Self {
            text: text.to_owned(),
            choices: choices
                .iter()
                .map(|&(digit, target)| {
                    let digit = Digit::new(digit)
                        .unwrap_or_else(|| panic!("invalid choice digit: {digit:?}"));
                    (digit, ChoiceTarget::from(target.to_owned()))
                })
                .collect(),
        }
    }

    /// Creates a terminal node: narration with no choices.
    #[must_use]
    pub fn terminal(text: &str) -> Self {
        Self::new(text, &[])
    }

    /// Whether this node ends the game.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }

    /// Looks up the transition for a digit press.
    #[must_use]
    pub fn choice(&self, digit: Digit) -> Option<&ChoiceTarget> {
        self.choices.get(&digit)
    }
}

/// A configuration defect found while validating a story graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryDefect {
    /// A required node (`start` or `continue_menu`) is missing.
    MissingNode(NodeId),
    /// A choice points at a node id that does not exist in the story.
    DanglingTarget {
        /// The node the bad choice lives on.
        node: NodeId,
        /// The digit mapped to the bad target.
        digit: Digit,
        /// The unresolved target node id.
        target: NodeId,
    },
}

impl fmt::Display for StoryDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode(node) => write!(f, "required node missing: {node}"),
            Self::DanglingTarget {
                node,
                digit,
                target,
            } => write!(f, "node {node} choice {digit} targets unknown node {target}"),
        }
    }
}

/// Catalog-facing story metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryInfo {
    /// Catalog identifier.
    pub id: StoryId,
    /// Display name, spoken in the selection menu.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Authoring version.
    pub version: String,
}

/// A complete story: metadata plus its node graph. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Catalog identifier.
    pub id: StoryId,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Authoring version.
    pub version: String,
    /// Node graph keyed by node id.
    pub nodes: BTreeMap<NodeId, StoryNode>,
}

impl Story {
    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&StoryNode> {
        self.nodes.get(id)
    }

    /// Returns the catalog metadata for this story.
    #[must_use]
    pub fn info(&self) -> StoryInfo {
        StoryInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
        }
    }

    /// Validates the story graph: `start` and `continue_menu` must exist,
    /// and every node-id choice target must resolve within this story.
    ///
    /// Sentinel targets are always valid. Violations are configuration
    /// defects — the catalog refuses to register a story that fails here.
    ///
    /// # Errors
    ///
    /// Returns every defect found, in node order.
    pub fn validate(&self) -> Result<(), Vec<StoryDefect>> {
        let mut defects = Vec::new();

        for required in [NodeId::start(), NodeId::continue_menu()] {
            if !self.nodes.contains_key(&required) {
                defects.push(StoryDefect::MissingNode(required));
            }
        }

        for (node_id, node) in &self.nodes {
            for (&digit, target) in &node.choices {
                if let ChoiceTarget::Node(target_id) = target
                    && !self.nodes.contains_key(target_id)
                {
                    defects.push(StoryDefect::DanglingTarget {
                        node: node_id.clone(),
                        digit,
                        target: target_id.clone(),
                    });
                }
            }
        }

        if defects.is_empty() { Ok(()) } else { Err(defects) }
    }

    /// SHA-256 digest of the story's canonical JSON serialization.
    ///
    /// Node and choice maps are ordered, so equal content yields an equal
    /// digest across processes.
    ///
    /// # Panics
    ///
    /// Panics if JSON serialization fails, which cannot happen for this
    /// type.
    #[must_use]
    pub fn content_digest(&self) -> String {
        let canonical = serde_json::to_vec(self).expect("story serialization is infallible");
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_story() -> Story {
        Story {
            id: StoryId::from("test-story"),
            name: "Test Story".to_owned(),
            description: "A tiny graph".to_owned(),
            version: "1.0.0".to_owned(),
            nodes: BTreeMap::from([
                (
                    NodeId::continue_menu(),
                    StoryNode::new(
                        "Press 1 to continue, or press 2 to start over.",
                        &[('1', "continue_game"), ('2', "start")],
                    ),
                ),
                (
                    NodeId::start(),
                    StoryNode::new("Press 1 to end.", &[('1', "ending")]),
                ),
                (
                    NodeId::from("ending"),
                    StoryNode::terminal("The end."),
                ),
            ]),
        }
    }

    #[test]
    fn test_choice_target_parses_sentinels() {
        assert_eq!(
            ChoiceTarget::from("continue_game".to_owned()),
            ChoiceTarget::ContinueGame
        );
        assert_eq!(
            ChoiceTarget::from("story_selection".to_owned()),
            ChoiceTarget::StorySelection
        );
        assert_eq!(
            ChoiceTarget::from("cave".to_owned()),
            ChoiceTarget::Node(NodeId::from("cave"))
        );
    }

    #[test]
    fn test_validate_accepts_well_formed_story() {
        assert!(two_node_story().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_dangling_target() {
        let mut story = two_node_story();
        story.nodes.insert(
            NodeId::from("broken"),
            StoryNode::new("Press 1.", &[('1', "nowhere")]),
        );

        let defects = story.validate().unwrap_err();
        assert_eq!(
            defects,
            vec![StoryDefect::DanglingTarget {
                node: NodeId::from("broken"),
                digit: Digit::new('1').unwrap(),
                target: NodeId::from("nowhere"),
            }]
        );
    }

    #[test]
    fn test_validate_reports_missing_required_nodes() {
        let mut story = two_node_story();
        story.nodes.remove(&NodeId::continue_menu());

        let defects = story.validate().unwrap_err();
        assert!(defects.contains(&StoryDefect::MissingNode(NodeId::continue_menu())));
    }

    #[test]
    fn test_content_digest_is_stable_and_content_sensitive() {
        let story = two_node_story();
        assert_eq!(story.content_digest(), story.content_digest());

        let mut changed = two_node_story();
        changed.nodes.get_mut(&NodeId::start()).unwrap().text = "Different.".to_owned();
        assert_ne!(story.content_digest(), changed.content_digest());
    }

    #[test]
    fn test_terminal_node_has_no_choices() {
        let story = two_node_story();
        let ending = story.node(&NodeId::from("ending")).unwrap();
        assert!(ending.is_terminal());
        assert!(
            ending
                .choice(Digit::new('1').unwrap())
                .is_none()
        );
    }
}
