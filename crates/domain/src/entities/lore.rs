//! Lore entity - history, legends and background knowledge

use serde::{Deserialize, Serialize};

use crate::ids::{LoreId, StoryId};
use crate::value_objects::Importance;

/// A piece of world knowledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreEntry {
    pub id: LoreId,
    pub story_id: StoryId,
    /// Free-form grouping, e.g. "History", "Legend", "Religion".
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    /// Where on the story's timeline this sits, e.g. "400 years before".
    #[serde(default)]
    pub timeline_position: Option<String>,
    #[serde(default)]
    pub importance: Importance,
}

impl LoreEntry {
    pub fn new(
        id: LoreId,
        story_id: StoryId,
        category: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id,
            story_id,
            category: category.into(),
            title: title.into(),
            content: None,
            timeline_position: None,
            importance: Importance::default(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}
