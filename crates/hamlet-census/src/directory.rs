//! Villager directory contract consumed by the census.
//!
//! The census never touches villager state directly. It asks a
//! [`VillagerDirectory`] for the current membership of a world, then submits
//! one observation per handle to be executed on the villager's own owning
//! context. The directory abstracts the host environment -- in production an
//! actor registry, in tests a canned stub.

use hamlet_types::{VillagerSnapshot, WorldName};

/// Errors that can occur while enumerating villagers.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The named world is not registered with the directory.
    #[error("unknown world: {world}")]
    UnknownWorld {
        /// The world that could not be enumerated.
        world: WorldName,
    },

    /// An internal error in the directory.
    #[error("directory error: {message}")]
    Internal {
        /// Description of the error.
        message: String,
    },
}

/// A source of villager handles and ownership-confined reads.
///
/// Implementations provide a point-in-time membership snapshot per world and
/// a way to run a pure observation on a villager's own owning context. The
/// census calls [`list_villagers`] once per cycle, then issues one
/// [`read_on_owner`] per handle without awaiting prior reads.
///
/// [`list_villagers`]: VillagerDirectory::list_villagers
/// [`read_on_owner`]: VillagerDirectory::read_on_owner
pub trait VillagerDirectory {
    /// Opaque reference to one live villager.
    ///
    /// Handles are only guaranteed valid for the cycle that enumerated them;
    /// a read against a handle whose villager has since despawned resolves
    /// to `None` rather than erroring.
    type Handle;

    /// Enumerate the current villager set for `world`.
    ///
    /// The returned sequence is a membership snapshot: villagers spawned or
    /// despawned afterwards are not reflected until the next enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the world cannot be enumerated at all.
    /// Individual villagers becoming unreadable is not an enumeration
    /// failure.
    fn list_villagers(&self, world: &WorldName) -> Result<Vec<Self::Handle>, DirectoryError>;

    /// Submit a pure observation to the villager's owning context and await
    /// the resulting snapshot.
    ///
    /// Resolves to `None` if the handle became invalid before the read ran
    /// (villager despawned between enumeration and read). The read never
    /// mutates villager state.
    fn read_on_owner(
        &self,
        handle: &Self::Handle,
    ) -> impl Future<Output = Option<VillagerSnapshot>>;
}
