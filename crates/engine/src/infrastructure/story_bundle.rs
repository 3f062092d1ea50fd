//! File-backed story data.
//!
//! A bundle is one JSON document holding every entity the generators read.
//! It is loaded once and served read-only through [`StoryReadPort`].

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use lightnovel_domain::*;
use serde::Deserialize;
use serde_json::Value;

use super::ports::{RepoError, StoryReadPort};

/// Stored progression row: the payload is either a parsed snapshot
/// (`{"fields": {...}}`) or JSON-encoded text.
#[derive(Debug, Clone, Deserialize)]
struct ProgressionRecord {
    story_id: StoryId,
    #[serde(default)]
    arc_id: Option<ArcId>,
    data: Value,
}

impl ProgressionRecord {
    fn to_progression(&self) -> Progression {
        match &self.data {
            Value::String(encoded) => Progression::Encoded(encoded.clone()),
            Value::Object(map) if map.contains_key("fields") => {
                let fields = map
                    .get("fields")
                    .cloned()
                    .map(serde_json::from_value::<BTreeMap<String, String>>);
                match fields {
                    Some(Ok(fields)) => Progression::Snapshot(ProgressionSnapshot {
                        story_id: self.story_id,
                        arc_id: self.arc_id,
                        fields,
                        updated_at: map
                            .get("updated_at")
                            .and_then(|v| serde_json::from_value(v.clone()).ok()),
                    }),
                    _ => Progression::Encoded(self.data.to_string()),
                }
            }
            other => Progression::Encoded(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BundleFile {
    stories: Vec<Story>,
    characters: Vec<Character>,
    locations: Vec<WorldLocation>,
    power_systems: Vec<PowerSystem>,
    lore: Vec<LoreEntry>,
    progressions: Vec<ProgressionRecord>,
}

/// Read-only story store backed by a JSON document.
#[derive(Debug, Clone, Default)]
pub struct JsonStoryBundle {
    data: BundleFile,
}

impl JsonStoryBundle {
    pub async fn load(path: &Path) -> Result<Self, RepoError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RepoError::storage("load_bundle", format!("{}: {}", path.display(), e)))?;
        let bundle = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            stories = bundle.data.stories.len(),
            characters = bundle.data.characters.len(),
            "Loaded story bundle"
        );
        Ok(bundle)
    }

    pub fn from_json(raw: &str) -> Result<Self, RepoError> {
        let data: BundleFile =
            serde_json::from_str(raw).map_err(|e| RepoError::serialization(e.to_string()))?;
        Ok(Self { data })
    }

    /// Stories in file order.
    pub fn stories(&self) -> &[Story] {
        &self.data.stories
    }
}

fn owned_by<T: Clone>(items: &[T], story_id: StoryId, owner: impl Fn(&T) -> StoryId) -> Vec<T> {
    items
        .iter()
        .filter(|item| owner(item) == story_id)
        .cloned()
        .collect()
}

#[async_trait]
impl StoryReadPort for JsonStoryBundle {
    async fn get_story(&self, id: StoryId) -> Result<Option<Story>, RepoError> {
        Ok(self.data.stories.iter().find(|s| s.id == id).cloned())
    }

    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Ok(self.data.characters.iter().find(|c| c.id == id).cloned())
    }

    async fn list_characters(&self, story_id: StoryId) -> Result<Vec<Character>, RepoError> {
        Ok(owned_by(&self.data.characters, story_id, |c| c.story_id))
    }

    async fn list_locations(&self, story_id: StoryId) -> Result<Vec<WorldLocation>, RepoError> {
        Ok(owned_by(&self.data.locations, story_id, |l| l.story_id))
    }

    async fn list_power_systems(&self, story_id: StoryId) -> Result<Vec<PowerSystem>, RepoError> {
        Ok(owned_by(&self.data.power_systems, story_id, |p| p.story_id))
    }

    async fn list_lore(&self, story_id: StoryId) -> Result<Vec<LoreEntry>, RepoError> {
        Ok(owned_by(&self.data.lore, story_id, |l| l.story_id))
    }

    async fn get_progression(
        &self,
        story_id: StoryId,
        arc_id: Option<ArcId>,
    ) -> Result<Option<Progression>, RepoError> {
        Ok(self
            .data
            .progressions
            .iter()
            .find(|p| p.story_id == story_id && p.arc_id == arc_id)
            .map(ProgressionRecord::to_progression))
    }
}
