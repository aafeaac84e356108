//! Built-in stories.
//!
//! Each story is a [`StoryProvider`](crate::catalog::StoryProvider) with its
//! node graph authored in code. New stories are added here and registered in
//! [`StoryCatalog::builtin`](crate::catalog::StoryCatalog::builtin).

mod mystic_forest;
mod space_adventure;

pub use mystic_forest::MysticForest;
pub use space_adventure::SpaceAdventure;
