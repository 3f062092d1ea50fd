//! Character tiers control how much detail a character gets in a prompt.

use serde::{Deserialize, Serialize};

use super::{CharacterRole, Importance};

/// Detail tier derived from role and importance.
///
/// Classification order matters: the role check runs first, then the
/// importance bands from highest to lowest. A value sitting on a band
/// boundary lands in the first band whose check it passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterTier {
    /// Rendered with every descriptive field.
    Protagonist,
    /// Rendered as one condensed line.
    Major,
    /// Rendered as a name in a comma-joined list.
    Supporting,
    /// Left out of chapter prompts.
    Minor,
}

impl CharacterTier {
    /// Lowest importance that counts as a major character.
    pub const MAJOR_MIN_IMPORTANCE: u8 = 3;
    /// Lowest importance that counts as a supporting character.
    pub const SUPPORTING_MIN_IMPORTANCE: u8 = 2;

    pub fn classify(role: &CharacterRole, importance: Importance) -> Self {
        if role.is_protagonist() {
            CharacterTier::Protagonist
        } else if importance.value() >= Self::MAJOR_MIN_IMPORTANCE {
            CharacterTier::Major
        } else if importance.value() >= Self::SUPPORTING_MIN_IMPORTANCE {
            CharacterTier::Supporting
        } else {
            CharacterTier::Minor
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterTier::Protagonist => "Protagonist",
            CharacterTier::Major => "Major",
            CharacterTier::Supporting => "Supporting",
            CharacterTier::Minor => "Minor",
        }
    }
}
