//! Story entity - one authored work and its metadata

use serde::{Deserialize, Serialize};

use crate::ids::StoryId;

/// A light novel project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub themes: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    /// Free-text descriptor such as "ReZero/Fate-inspired".
    #[serde(default)]
    pub writing_style: Option<String>,
    /// Preferred chapter length in words, if the author set one.
    #[serde(default)]
    pub target_chapter_words: Option<u32>,
}

impl Story {
    pub fn new(id: StoryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            synopsis: None,
            genre: None,
            themes: None,
            tone: None,
            writing_style: None,
            target_chapter_words: None,
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = Some(synopsis.into());
        self
    }
}
