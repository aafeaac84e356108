//! Space Adventure.

use std::collections::BTreeMap;

use fableline_core::id::{NodeId, StoryId};

use crate::catalog::StoryProvider;
use crate::story::{Story, StoryInfo, StoryNode};

/// An exciting journey through the galaxy.
#[derive(Debug, Clone, Copy)]
pub struct SpaceAdventure;

impl StoryProvider for SpaceAdventure {
    fn id(&self) -> StoryId {
        StoryId::from("space-adventure")
    }

    fn info(&self) -> StoryInfo {
        StoryInfo {
            id: self.id(),
            name: "Space Adventure".to_owned(),
            description: "An exciting journey through the galaxy".to_owned(),
            version: "1.0.0".to_owned(),
        }
    }

    fn build(&self) -> Story {
        let info = self.info();
        let nodes = BTreeMap::from([
            (
                NodeId::continue_menu(),
                StoryNode::new(
                    "Welcome back, Space Explorer! I see you were in the middle of \
                     your mission. Press 1 to continue where you left off, or press \
                     2 to start a brand new mission.",
                    &[('1', "continue_game"), ('2', "start")],
                ),
            ),
            (
                NodeId::start(),
                StoryNode::new(
                    "Welcome to Space Adventure! You are a space explorer on a \
                     distant planet. Press 1 to explore the alien ruins, or press \
                     2 to investigate the crashed spaceship.",
                    &[('1', "ruins"), ('2', "spaceship")],
                ),
            ),
            (
                NodeId::from("ruins"),
                StoryNode::new(
                    "You discover ancient alien ruins with glowing symbols. Press \
                     1 to touch the symbols, or press 2 to take photos and retreat.",
                    &[('1', "portal"), ('2', "safe_return")],
                ),
            ),
            (
                NodeId::from("spaceship"),
                StoryNode::new(
                    "You find a crashed spaceship with its cargo bay open. Press 1 \
                     to enter the ship, or press 2 to search the surrounding area.",
                    &[('1', "inside_ship"), ('2', "search_area")],
                ),
            ),
            (
                NodeId::from("portal"),
                StoryNode::terminal(
                    "The symbols activate and open a portal to another dimension! \
                     You are transported to a world of infinite possibilities. \
                     Mission accomplished! Thanks for playing!",
                ),
            ),
            (
                NodeId::from("safe_return"),
                StoryNode::terminal(
                    "You safely document the ruins and return to your base camp. \
                     Your scientific discovery will help humanity! Mission \
                     successful! Thanks for playing!",
                ),
            ),
            (
                NodeId::from("inside_ship"),
                StoryNode::new(
                    "Inside the ship, you find alien technology beyond \
                     comprehension. Press 1 to try to activate it, or press 2 to \
                     carefully study it first.",
                    &[('1', "activate_tech"), ('2', "study_tech")],
                ),
            ),
            (
                NodeId::from("search_area"),
                StoryNode::terminal(
                    "You discover valuable alien artifacts scattered around the \
                     crash site. Your expedition is a huge success! Thanks for \
                     playing!",
                ),
            ),
            (
                NodeId::from("activate_tech"),
                StoryNode::terminal(
                    "The alien technology malfunctions and creates a dangerous \
                     energy surge! You barely escape, but the experience teaches \
                     you valuable lessons about alien science. Thanks for playing!",
                ),
            ),
            (
                NodeId::from("study_tech"),
                StoryNode::terminal(
                    "Your careful study reveals the secrets of faster-than-light \
                     travel! You make the most important scientific discovery in \
                     human history. Thanks for playing!",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_is_well_formed() {
        assert!(SpaceAdventure.build().validate().is_ok());
    }

    #[test]
    fn test_every_path_reaches_an_ending() {
        // Walk the graph from start; every branch must reach a terminal node.
        let story = SpaceAdventure.build();
        let mut pending = vec![NodeId::start()];
        let mut visited = std::collections::BTreeSet::new();
        let mut endings = 0;

        while let Some(id) = pending.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }
            let node = story.node(&id).unwrap();
            if node.is_terminal() {
                endings += 1;
            }
            for target in node.choices.values() {
                if let crate::story::ChoiceTarget::Node(next) = target {
                    pending.push(next.clone());
                }
            }
        }

        assert_eq!(endings, 5);
    }
}
