//! Value objects - Immutable objects defined by their attributes

mod character_role;
mod character_tier;
mod importance;

pub use character_role::CharacterRole;
pub use character_tier::CharacterTier;
pub use importance::Importance;
