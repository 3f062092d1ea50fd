//! Repository port traits for story data access.
//!
//! Read-only: the authoring application owns every write.

use async_trait::async_trait;
use lightnovel_domain::*;

use super::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryReadPort: Send + Sync {
    async fn get_story(&self, id: StoryId) -> Result<Option<Story>, RepoError>;

    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn list_characters(&self, story_id: StoryId) -> Result<Vec<Character>, RepoError>;

    async fn list_locations(&self, story_id: StoryId) -> Result<Vec<WorldLocation>, RepoError>;
    async fn list_power_systems(&self, story_id: StoryId) -> Result<Vec<PowerSystem>, RepoError>;
    async fn list_lore(&self, story_id: StoryId) -> Result<Vec<LoreEntry>, RepoError>;

    /// Progression for the story, or for one of its arcs when `arc_id` is set.
    async fn get_progression(
        &self,
        story_id: StoryId,
        arc_id: Option<ArcId>,
    ) -> Result<Option<Progression>, RepoError>;
}
