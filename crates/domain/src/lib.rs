//! Light novel domain.
//!
//! Read-only views of the entities a story is built from. The persistence
//! layer owns and mutates these; everything downstream only reads them.

extern crate self as lightnovel_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    Character, LoreEntry, PowerSystem, Progression, ProgressionSnapshot, Story, WorldLocation,
};
pub use error::DomainError;
pub use ids::{ArcId, CharacterId, LocationId, LoreId, PowerSystemId, StoryId};
pub use value_objects::{CharacterRole, CharacterTier, Importance};

/// Returns the trimmed text when it carries content.
///
/// Optional free-text fields are stored as `Option<String>`, but the
/// persistence layer also hands back empty strings. Both count as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_filters_empty_and_whitespace() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some(" Tokyo ")), Some("Tokyo"));
    }
}
