//! Enumeration types for the villager census.
//!
//! The variant sets mirror the host game's villager taxonomy: a biome-bound
//! kind, an optional trade profession, and a small experience level. Each
//! enum projects a lowercase stable label string used verbatim as a metric
//! label value, so renaming a variant here is a breaking change for any
//! dashboard querying the published series.

use serde::{Deserialize, Serialize};

/// Label value published for villagers that hold no profession.
///
/// Profession absence is modelled as `Option::None` in snapshots but must
/// still occupy exactly one grouping in the published label set, so it maps
/// to this sentinel rather than an omitted label.
pub const PROFESSION_NONE_LABEL: &str = "none";

/// The biome-bound kind of a villager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VillagerKind {
    /// Sandstone-dwelling desert villager.
    Desert,
    /// Jungle villager.
    Jungle,
    /// Plains villager, the default kind.
    Plains,
    /// Savanna villager.
    Savanna,
    /// Snowy-biome villager.
    Snow,
    /// Swamp villager.
    Swamp,
    /// Taiga villager.
    Taiga,
}

impl VillagerKind {
    /// Every kind, in label order.
    pub const ALL: [Self; 7] = [
        Self::Desert,
        Self::Jungle,
        Self::Plains,
        Self::Savanna,
        Self::Snow,
        Self::Swamp,
        Self::Taiga,
    ];

    /// The lowercase stable identifier published as the `type` label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Desert => "desert",
            Self::Jungle => "jungle",
            Self::Plains => "plains",
            Self::Savanna => "savanna",
            Self::Snow => "snow",
            Self::Swamp => "swamp",
            Self::Taiga => "taiga",
        }
    }
}

/// The trade profession held by a villager.
///
/// A villager may hold no profession at all; that absence is represented
/// as `Option<Profession>::None` and published under
/// [`PROFESSION_NONE_LABEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Profession {
    /// Trades armor pieces.
    Armorer,
    /// Trades cooked meat.
    Butcher,
    /// Trades maps.
    Cartographer,
    /// Trades enchanting ingredients.
    Cleric,
    /// Trades crops and produce.
    Farmer,
    /// Trades fish and fishing gear.
    Fisherman,
    /// Trades arrows and bows.
    Fletcher,
    /// Trades leather goods.
    Leatherworker,
    /// Trades books and enchantments.
    Librarian,
    /// Trades cut stone.
    Mason,
    /// Holds a profession slot but never trades.
    Nitwit,
    /// Trades wool and shears.
    Shepherd,
    /// Trades tools.
    Toolsmith,
    /// Trades weapons.
    Weaponsmith,
}

impl Profession {
    /// Every profession, in label order.
    pub const ALL: [Self; 14] = [
        Self::Armorer,
        Self::Butcher,
        Self::Cartographer,
        Self::Cleric,
        Self::Farmer,
        Self::Fisherman,
        Self::Fletcher,
        Self::Leatherworker,
        Self::Librarian,
        Self::Mason,
        Self::Nitwit,
        Self::Shepherd,
        Self::Toolsmith,
        Self::Weaponsmith,
    ];

    /// The lowercase stable identifier published as the `profession` label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Armorer => "armorer",
            Self::Butcher => "butcher",
            Self::Cartographer => "cartographer",
            Self::Cleric => "cleric",
            Self::Farmer => "farmer",
            Self::Fisherman => "fisherman",
            Self::Fletcher => "fletcher",
            Self::Leatherworker => "leatherworker",
            Self::Librarian => "librarian",
            Self::Mason => "mason",
            Self::Nitwit => "nitwit",
            Self::Shepherd => "shepherd",
            Self::Toolsmith => "toolsmith",
            Self::Weaponsmith => "weaponsmith",
        }
    }
}
