//! Importance score shared by characters and lore entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// How central an entity is to the story, from 1 (background) to 5 (pivotal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Importance(u8);

impl Importance {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::validation(format!(
                "importance must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for Importance {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Importance> for u8 {
    fn from(value: Importance) -> Self {
        value.0
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_in_range() {
        for v in 1..=5 {
            assert_eq!(Importance::new(v).map(Importance::value), Ok(v));
        }
    }

    #[test]
    fn rejects_values_out_of_range() {
        assert!(Importance::new(0).is_err());
        assert!(Importance::new(6).is_err());
    }

    #[test]
    fn deserialization_validates_range() {
        let ok: Importance = serde_json::from_str("4").expect("4 is in range");
        assert_eq!(ok.value(), 4);
        assert!(serde_json::from_str::<Importance>("9").is_err());
    }
}
