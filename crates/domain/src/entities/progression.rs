//! Progression snapshot - narrative state tracked per story or arc

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::{ArcId, StoryId};

/// Named narrative-tracking fields for a story, optionally scoped to an arc.
///
/// Fields are kept in a sorted map so iteration order never depends on how
/// the snapshot was loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    pub story_id: StoryId,
    #[serde(default)]
    pub arc_id: Option<ArcId>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProgressionSnapshot {
    pub fn new(story_id: StoryId) -> Self {
        Self {
            story_id,
            ..Default::default()
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Progression as handed over by the persistence layer.
///
/// Arc progression is stored as JSON text, so callers either parse it
/// themselves or pass the raw text through.
#[derive(Debug, Clone, PartialEq)]
pub enum Progression {
    Snapshot(ProgressionSnapshot),
    /// JSON-encoded mapping of tracking fields, possibly malformed.
    Encoded(String),
}

impl From<ProgressionSnapshot> for Progression {
    fn from(snapshot: ProgressionSnapshot) -> Self {
        Progression::Snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_looked_up_by_name() {
        let snapshot = ProgressionSnapshot::new(StoryId::new(1))
            .with_field("current_plot_points", "The tower falls");
        assert_eq!(snapshot.get("current_plot_points"), Some("The tower falls"));
        assert_eq!(snapshot.get("foreshadowing"), None);
    }
}
