use lightnovel_domain::{CharacterId, StoryId};

use crate::infrastructure::ports::{LlmError, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum UseCaseError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Generation failed: {0}")]
    Llm(#[from] LlmError),
    #[error("Story not found: {0}")]
    StoryNotFound(StoryId),
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Unknown style preset: {0}")]
    UnknownStylePreset(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl UseCaseError {
    /// The generation error, when that is what failed.
    pub fn llm_error(&self) -> Option<&LlmError> {
        match self {
            UseCaseError::Llm(e) => Some(e),
            _ => None,
        }
    }

    /// Sentence for authors, starting with `Error:`.
    pub fn display_text(&self) -> String {
        match self {
            UseCaseError::Llm(e) => e.display_text(),
            other => format!("Error: {}", other),
        }
    }
}
