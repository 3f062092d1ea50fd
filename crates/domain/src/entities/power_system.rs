//! Power system entity - magic and ability frameworks

use serde::{Deserialize, Serialize};

use crate::ids::{PowerSystemId, StoryId};

/// Rules governing magic, skills or any other supernatural ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSystem {
    pub id: PowerSystemId,
    pub story_id: StoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub limitations: Option<String>,
    #[serde(default)]
    pub acquisition_method: Option<String>,
    #[serde(default)]
    pub power_levels: Option<String>,
    #[serde(default)]
    pub examples: Option<String>,
}

impl PowerSystem {
    pub fn new(id: PowerSystemId, story_id: StoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            story_id,
            name: name.into(),
            description: None,
            rules: None,
            limitations: None,
            acquisition_method: None,
            power_levels: None,
            examples: None,
        }
    }
}
