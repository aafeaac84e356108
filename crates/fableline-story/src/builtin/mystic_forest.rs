//! Mystic Forest Adventure.

use std::collections::BTreeMap;

use fableline_core::id::{NodeId, StoryId};

use crate::catalog::StoryProvider;
use crate::story::{Story, StoryInfo, StoryNode};

/// A magical adventure through an enchanted forest.
#[derive(Debug, Clone, Copy)]
pub struct MysticForest;

impl StoryProvider for MysticForest {
    fn id(&self) -> StoryId {
        StoryId::from("mystic-forest")
    }

    fn info(&self) -> StoryInfo {
        StoryInfo {
            id: self.id(),
            name: "Mystic Forest Adventure".to_owned(),
            description: "A magical adventure through an enchanted forest".to_owned(),
            version: "1.0.0".to_owned(),
        }
    }

    fn build(&self) -> Story {
        let info = self.info();
        let nodes = BTreeMap::from([
            (
                NodeId::continue_menu(),
                StoryNode::new(
                    "Welcome back! I see you were in the middle of an adventure. \
                     Press 1 to continue where you left off, or press 2 to start \
                     a brand new adventure.",
                    &[('1', "continue_game"), ('2', "start")],
                ),
            ),
            (
                NodeId::start(),
                StoryNode::new(
                    "Welcome to the Mystic Forest Adventure! You find yourself at \
                     a crossroads. Press 1 to go left toward the dark cave, or \
                     press 2 to go right toward the sunny meadow.",
                    &[('1', "cave"), ('2', "meadow")],
                ),
            ),
            (
                NodeId::from("cave"),
                StoryNode::new(
                    "You enter the dark cave and hear strange noises. Press 1 to \
                     investigate the sounds, or press 2 to turn back.",
                    &[('1', "monster"), ('2', "start")],
                ),
            ),
            (
                NodeId::from("meadow"),
                StoryNode::new(
                    "You walk into a beautiful sunny meadow filled with flowers. \
                     Press 1 to pick flowers, or press 2 to rest under a tree.",
                    &[('1', "flowers"), ('2', "rest")],
                ),
            ),
            (
                NodeId::from("monster"),
                StoryNode::terminal(
                    "Oh no! You've awakened a sleeping dragon! The adventure ends \
                     here. Thanks for playing! Goodbye.",
                ),
            ),
            (
                NodeId::from("flowers"),
                StoryNode::terminal(
                    "You pick beautiful flowers and find a magic potion! You win! \
                     Thanks for playing! Goodbye.",
                ),
            ),
            (
                NodeId::from("rest"),
                StoryNode::new(
                    "You rest peacefully and feel refreshed. Press 1 to explore \
                     more of the meadow, or press 2 to return to the crossroads.",
                    &[('1', "flowers"), ('2', "start")],
                ),
            ),
        ]);

        Story {
            id: info.id,
            name: info.name,
            description: info.description,
            version: info.version,
            nodes,
        }
    }
}
