//! Character entity - a member of a story's cast

use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, StoryId};
use crate::value_objects::{CharacterRole, CharacterTier, Importance};

/// A character belonging to exactly one story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub story_id: StoryId,
    pub name: String,
    pub role: CharacterRole,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,

    // Descriptive free text
    #[serde(default)]
    pub appearance: Option<String>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub abilities: Option<String>,
    #[serde(default)]
    pub motivations: Option<String>,
    #[serde(default)]
    pub relationships: Option<String>,
    #[serde(default)]
    pub voice_style: Option<String>,
    #[serde(default)]
    pub character_arc: Option<String>,
}

impl Character {
    pub fn new(
        id: CharacterId,
        story_id: StoryId,
        name: impl Into<String>,
        role: CharacterRole,
        importance: Importance,
    ) -> Self {
        Self {
            id,
            story_id,
            name: name.into(),
            role,
            importance,
            age: None,
            gender: None,
            appearance: None,
            personality: None,
            background: None,
            abilities: None,
            motivations: None,
            relationships: None,
            voice_style: None,
            character_arc: None,
        }
    }

    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = Some(personality.into());
        self
    }

    pub fn with_abilities(mut self, abilities: impl Into<String>) -> Self {
        self.abilities = Some(abilities.into());
        self
    }

    pub fn tier(&self) -> CharacterTier {
        CharacterTier::classify(&self.role, self.importance)
    }
}
