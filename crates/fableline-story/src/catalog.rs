//! Story catalog: a static registry of story providers.
//!
//! Providers are registered at startup and each story graph is built and
//! validated before the catalog accepts it. Loaded stories are cached;
//! `reload` rebuilds one cache entry from its provider when a caller
//! switches adventures.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::warn;

use fableline_core::error::GameError;
use fableline_core::id::StoryId;

use crate::builtin::{MysticForest, SpaceAdventure};
use crate::story::{Story, StoryInfo};

/// A source for one story. Implementations are plain structs registered in
/// code; there is no dynamic loading.
pub trait StoryProvider: Send + Sync {
    /// The catalog identifier this provider serves.
    fn id(&self) -> StoryId;

    /// Catalog metadata, cheap to produce.
    fn info(&self) -> StoryInfo;

    /// Builds the full story graph.
    fn build(&self) -> Story;
}

/// Registry of story providers with a cache of built stories.
pub struct StoryCatalog {
    /// Providers in registration order; the selection menu follows it.
    providers: Vec<Arc<dyn StoryProvider>>,
    cache: RwLock<HashMap<StoryId, Arc<Story>>>,
    default_story: StoryId,
}

impl StoryCatalog {
    /// Creates a catalog from providers, building and validating every
    /// story up front.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if a story graph fails validation, and
    /// [`GameError::UnknownStory`] if `default_story` matches no provider.
    pub fn new(
        providers: Vec<Arc<dyn StoryProvider>>,
        default_story: StoryId,
    ) -> Result<Self, GameError> {
        let mut cache = HashMap::with_capacity(providers.len());
        for provider in &providers {
            let story = provider.build();
            story.validate().map_err(|defects| {
                let listing = defects
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                GameError::Config(format!("story {} is invalid: {listing}", provider.id()))
            })?;
            cache.insert(provider.id(), Arc::new(story));
        }

        if !cache.contains_key(&default_story) {
            return Err(GameError::UnknownStory(default_story));
        }

        Ok(Self {
            providers,
            cache: RwLock::new(cache),
            default_story,
        })
    }

    /// Creates a catalog with the built-in stories.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownStory`] if `default_story` is not one of
    /// the built-in story ids.
    pub fn builtin(default_story: StoryId) -> Result<Self, GameError> {
        Self::new(
            vec![Arc::new(MysticForest), Arc::new(SpaceAdventure)],
            default_story,
        )
    }

    /// Lists registered stories in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<StoryInfo> {
        self.providers.iter().map(|p| p.info()).collect()
    }

    /// Returns the story registered at 1-based `index` in the listing.
    #[must_use]
    pub fn story_at(&self, index: usize) -> Option<StoryId> {
        if index == 0 {
            return None;
        }
        self.providers.get(index - 1).map(|p| p.id())
    }

    /// The configured default story id.
    #[must_use]
    pub fn default_story_id(&self) -> &StoryId {
        &self.default_story
    }

    /// Loads a story from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownStory`] for ids with no registered
    /// provider.
    ///
    /// # Panics
    ///
    /// Panics if the cache lock is poisoned.
    pub fn load(&self, id: &StoryId) -> Result<Arc<Story>, GameError> {
        self.cache
            .read()
            .expect("story cache lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| GameError::UnknownStory(id.clone()))
    }

    /// Loads a story, falling back to the default story when the id does
    /// not resolve. The fallback is logged; it is a deliberate availability
    /// policy, not a silent catch.
    ///
    /// # Panics
    ///
    /// Panics if the cache lock is poisoned.
    #[must_use]
    pub fn load_or_default(&self, id: &StoryId) -> Arc<Story> {
        match self.load(id) {
            Ok(story) => story,
            Err(_) => {
                warn!(story = %id, default = %self.default_story, "unknown story, falling back to default");
                self.load(&self.default_story)
                    .expect("default story is validated at construction")
            }
        }
    }

    /// Loads the default story.
    #[must_use]
    pub fn load_default(&self) -> Arc<Story> {
        self.load(&self.default_story)
            .expect("default story is validated at construction")
    }

    /// Rebuilds one cache entry from its provider. Used when a caller
    /// switches adventures.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownStory`] for ids with no registered
    /// provider.
    ///
    /// # Panics
    ///
    /// Panics if the cache lock is poisoned.
    pub fn reload(&self, id: &StoryId) -> Result<Arc<Story>, GameError> {
        let provider = self
            .providers
            .iter()
            .find(|p| &p.id() == id)
            .ok_or_else(|| GameError::UnknownStory(id.clone()))?;

        let story = Arc::new(provider.build());
        self.cache
            .write()
            .expect("story cache lock poisoned")
            .insert(id.clone(), Arc::clone(&story));
        Ok(story)
    }
}

impl std::fmt::Debug for StoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryCatalog")
            .field("stories", &self.list().len())
            .field("default_story", &self.default_story)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StoryCatalog {
        StoryCatalog::builtin(StoryId::from("mystic-forest")).unwrap()
    }

    #[test]
    fn test_builtin_catalog_lists_stories_in_registration_order() {
        let infos = catalog().list();
        let ids: Vec<&str> = infos.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["mystic-forest", "space-adventure"]);
    }

    #[test]
    fn test_story_at_is_one_based() {
        let catalog = catalog();
        assert_eq!(catalog.story_at(1), Some(StoryId::from("mystic-forest")));
        assert_eq!(catalog.story_at(2), Some(StoryId::from("space-adventure")));
        assert_eq!(catalog.story_at(0), None);
        assert_eq!(catalog.story_at(3), None);
    }

    #[test]
    fn test_load_unknown_story_fails() {
        let result = catalog().load(&StoryId::from("missing"));
        assert!(matches!(result, Err(GameError::UnknownStory(_))));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let story = catalog().load_or_default(&StoryId::from("missing"));
        assert_eq!(story.id, StoryId::from("mystic-forest"));
    }

    #[test]
    fn test_unknown_default_story_is_a_config_error() {
        let result = StoryCatalog::builtin(StoryId::from("missing"));
        assert!(matches!(result, Err(GameError::UnknownStory(_))));
    }

    #[test]
    fn test_reload_replaces_cache_entry() {
        let catalog = catalog();
        let id = StoryId::from("space-adventure");

        let before = catalog.load(&id).unwrap();
        let after = catalog.reload(&id).unwrap();

        // Same content rebuilt from the provider, distinct allocation.
        assert_eq!(before.content_digest(), after.content_digest());
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &catalog.load(&id).unwrap()));
    }
}
