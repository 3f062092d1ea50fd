//! Narrative role of a character.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a character plays in the story.
///
/// Authors type the role freely, so unknown labels are kept verbatim in
/// [`CharacterRole::Other`] instead of being rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CharacterRole {
    Protagonist,
    /// Legacy label used by earlier story files for the lead.
    MainCharacter,
    Deuteragonist,
    Antagonist,
    Major,
    #[default]
    Supporting,
    Minor,
    Other(String),
}

impl CharacterRole {
    /// Roles that always get the full-detail treatment in chapter prompts.
    pub fn is_protagonist(&self) -> bool {
        matches!(
            self,
            CharacterRole::Protagonist | CharacterRole::MainCharacter | CharacterRole::Deuteragonist
        )
    }

    pub fn display_name(&self) -> &str {
        match self {
            CharacterRole::Protagonist => "Protagonist",
            CharacterRole::MainCharacter => "Main Character",
            CharacterRole::Deuteragonist => "Deuteragonist",
            CharacterRole::Antagonist => "Antagonist",
            CharacterRole::Major => "Major",
            CharacterRole::Supporting => "Supporting",
            CharacterRole::Minor => "Minor",
            CharacterRole::Other(label) => label,
        }
    }
}

impl fmt::Display for CharacterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl From<&str> for CharacterRole {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "protagonist" => CharacterRole::Protagonist,
            "main character" | "main_character" => CharacterRole::MainCharacter,
            "deuteragonist" => CharacterRole::Deuteragonist,
            "antagonist" => CharacterRole::Antagonist,
            "major" => CharacterRole::Major,
            "supporting" => CharacterRole::Supporting,
            "minor" => CharacterRole::Minor,
            _ => CharacterRole::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for CharacterRole {
    fn from(s: String) -> Self {
        CharacterRole::from(s.as_str())
    }
}

impl From<CharacterRole> for String {
    fn from(role: CharacterRole) -> Self {
        role.display_name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles_case_insensitively() {
        assert_eq!(CharacterRole::from("PROTAGONIST"), CharacterRole::Protagonist);
        assert_eq!(CharacterRole::from("Main Character"), CharacterRole::MainCharacter);
        assert_eq!(CharacterRole::from(" deuteragonist "), CharacterRole::Deuteragonist);
        assert_eq!(CharacterRole::from("Antagonist"), CharacterRole::Antagonist);
    }

    #[test]
    fn keeps_unknown_labels_verbatim() {
        let role = CharacterRole::from("Rival Swordsman");
        assert_eq!(role, CharacterRole::Other("Rival Swordsman".to_string()));
        assert_eq!(role.to_string(), "Rival Swordsman");
    }

    #[test]
    fn protagonist_family() {
        assert!(CharacterRole::Protagonist.is_protagonist());
        assert!(CharacterRole::MainCharacter.is_protagonist());
        assert!(CharacterRole::Deuteragonist.is_protagonist());
        assert!(!CharacterRole::Antagonist.is_protagonist());
        assert!(!CharacterRole::Other("hero".into()).is_protagonist());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&CharacterRole::MainCharacter).expect("serialize");
        assert_eq!(json, "\"Main Character\"");
        let back: CharacterRole = serde_json::from_str("\"minor\"").expect("deserialize");
        assert_eq!(back, CharacterRole::Minor);
    }
}
