//! Domain entities - read-only views of stored story data

mod character;
mod location;
mod lore;
mod power_system;
mod progression;
mod story;

pub use character::Character;
pub use location::WorldLocation;
pub use lore::LoreEntry;
pub use power_system::PowerSystem;
pub use progression::{Progression, ProgressionSnapshot};
pub use story::Story;
