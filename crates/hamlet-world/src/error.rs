//! Error types for the `hamlet-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use hamlet_types::{VillagerId, WorldName};

/// Errors that can occur during world registry operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A world was registered under a name that is already taken.
    #[error("duplicate world name: {world}")]
    DuplicateWorld {
        /// The already-registered name.
        world: WorldName,
    },

    /// The named world is not registered.
    #[error("unknown world: {world}")]
    UnknownWorld {
        /// The unregistered name.
        world: WorldName,
    },

    /// The villager is not registered in the named world.
    #[error("unknown villager {villager} in world {world}")]
    UnknownVillager {
        /// The world that was searched.
        world: WorldName,
        /// The missing villager.
        villager: VillagerId,
    },

    /// The villager's command mailbox is closed (owning task stopped).
    #[error("mailbox closed for villager {villager}")]
    Mailbox {
        /// The unreachable villager.
        villager: VillagerId,
    },

    /// The world registry lock was poisoned by a panicking writer.
    #[error("world registry lock poisoned")]
    RegistryPoisoned,
}
