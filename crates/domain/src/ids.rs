use std::fmt;

use serde::{Deserialize, Serialize};

/// Row identifiers assigned by the persistence layer.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Story and cast
define_id!(StoryId);
define_id!(CharacterId);

// World building
define_id!(LocationId);
define_id!(PowerSystemId);
define_id!(LoreId);

// Narrative arcs
define_id!(ArcId);
