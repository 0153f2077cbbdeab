//! Type-safe identifier wrappers.
//!
//! Villagers are identified by a strongly-typed UUID wrapper to prevent
//! accidental mixing of identifiers at compile time, using UUID v7
//! (time-ordered) so identifiers sort by spawn order. Worlds are identified
//! by their server-assigned name, which doubles as the `world` label value
//! on published metric rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a villager in a simulated world.
    VillagerId
}

/// The name of a simulated world, as assigned by the game server.
///
/// World names are the primary key for census cycles and appear verbatim
/// as the `world` label on published rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldName(String);

impl WorldName {
    /// Create a world name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for WorldName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WorldName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for WorldName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn villager_ids_are_unique() {
        let a = VillagerId::new();
        let b = VillagerId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = VillagerId::new();
        let json = serde_json::to_string(&original).unwrap();
        let restored: VillagerId = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = VillagerId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn world_name_serializes_transparently() {
        let world = WorldName::from("overworld");
        let json = serde_json::to_string(&world).unwrap();
        assert_eq!(json, "\"overworld\"");
        assert_eq!(world.as_str(), "overworld");
    }
}
