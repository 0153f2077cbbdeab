//! Grouping key extraction for census aggregation.
//!
//! A [`GroupingKey`] is the composite identity villagers are bucketed under
//! before counting: kind, profession (or its absence), and level. Equality
//! and hashing are structural, so two snapshots with identical fields
//! collapse into the same bucket.

use hamlet_types::{PROFESSION_NONE_LABEL, Profession, VillagerKind, VillagerSnapshot};
use serde::{Deserialize, Serialize};

/// The composite key one villager snapshot aggregates under.
///
/// Keys are created fresh each cycle from snapshots and never persisted.
/// Label projection is total: profession absence maps to
/// [`PROFESSION_NONE_LABEL`] rather than an omitted label, so every key
/// projects to exactly one published row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupingKey {
    /// The villager's biome-bound kind.
    pub kind: VillagerKind,
    /// The villager's profession, if any.
    pub profession: Option<Profession>,
    /// The villager's experience level.
    pub level: u8,
}

impl GroupingKey {
    /// Derive the grouping key for one snapshot.
    ///
    /// Pure and total: every snapshot maps to exactly one key.
    pub const fn from_snapshot(snapshot: VillagerSnapshot) -> Self {
        Self {
            kind: snapshot.kind,
            profession: snapshot.profession,
            level: snapshot.level,
        }
    }

    /// The value published as the `type` label.
    pub const fn kind_label(self) -> &'static str {
        self.kind.label()
    }

    /// The value published as the `profession` label.
    pub const fn profession_label(self) -> &'static str {
        match self.profession {
            Some(profession) => profession.label(),
            None => PROFESSION_NONE_LABEL,
        }
    }

    /// The value published as the `level` label: the decimal string form.
    pub fn level_label(self) -> String {
        self.level.to_string()
    }
}

impl From<VillagerSnapshot> for GroupingKey {
    fn from(snapshot: VillagerSnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}
