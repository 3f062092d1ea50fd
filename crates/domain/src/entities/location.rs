//! World location entity - places in a story's setting

use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, StoryId};

/// A city, region, dungeon or any other place in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLocation {
    pub id: LocationId,
    pub story_id: StoryId,
    pub name: String,
    /// Free-form kind, e.g. "Kingdom", "City", "Forest".
    pub location_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub geography: Option<String>,
    #[serde(default)]
    pub climate: Option<String>,
    #[serde(default)]
    pub population: Option<String>,
    #[serde(default)]
    pub government: Option<String>,
    #[serde(default)]
    pub economy: Option<String>,
    #[serde(default)]
    pub culture: Option<String>,
    #[serde(default)]
    pub history: Option<String>,
    #[serde(default)]
    pub notable_locations: Option<String>,
}

impl WorldLocation {
    pub fn new(
        id: LocationId,
        story_id: StoryId,
        name: impl Into<String>,
        location_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            story_id,
            name: name.into(),
            location_type: location_type.into(),
            description: None,
            geography: None,
            climate: None,
            population: None,
            government: None,
            economy: None,
            culture: None,
            history: None,
            notable_locations: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
