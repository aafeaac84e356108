//! Fableline — Story Catalog.
//!
//! Stories are static, hand-authored directed graphs of narration nodes.
//! This crate defines the node/graph model, graph validation, and a catalog
//! of built-in stories resolved at startup. There is no runtime story
//! loading: every story is a [`catalog::StoryProvider`] registered in code.

pub mod builtin;
pub mod catalog;
pub mod story;

pub use catalog::{StoryCatalog, StoryProvider};
pub use story::{ChoiceTarget, Story, StoryInfo, StoryNode};
