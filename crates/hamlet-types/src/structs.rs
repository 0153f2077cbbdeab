//! Core value structs for the Hamlet census.

use serde::{Deserialize, Serialize};

use crate::enums::{Profession, VillagerKind};

/// The highest experience level a villager can reach.
pub const MAX_LEVEL: u8 = 5;

/// The experience level newly spawned villagers start at.
pub const MIN_LEVEL: u8 = 1;

/// An immutable observation of one villager.
///
/// Snapshots are taken atomically inside the villager's owning task and
/// handed back to the census over a reply channel. They carry no identity:
/// two villagers with the same kind, profession, and level produce
/// indistinguishable snapshots, which is exactly what grouping requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VillagerSnapshot {
    /// The villager's biome-bound kind.
    pub kind: VillagerKind,
    /// The villager's profession, if any.
    pub profession: Option<Profession>,
    /// The villager's experience level.
    pub level: u8,
}

impl VillagerSnapshot {
    /// Create a snapshot from its parts.
    pub const fn new(kind: VillagerKind, profession: Option<Profession>, level: u8) -> Self {
        Self {
            kind,
            profession,
            level,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_roundtrip_serde() {
        let original = VillagerSnapshot::new(VillagerKind::Plains, Some(Profession::Farmer), 3);
        let json = serde_json::to_string(&original).unwrap();
        let restored: VillagerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn snapshots_with_equal_fields_are_equal() {
        let a = VillagerSnapshot::new(VillagerKind::Desert, None, 1);
        let b = VillagerSnapshot::new(VillagerKind::Desert, None, 1);
        assert_eq!(a, b);
    }
}
