//! In-process world host for the Hamlet census.
//!
//! Provides the census's scheduler/entity-directory collaborator: every
//! villager's state lives on its own tokio task (the owning context), and
//! [`WorldDirectory`] keeps the per-world registry of handles to those
//! tasks. Reads and mutations are messages into the owning task's mailbox,
//! so the single-writer discipline is enforced by ownership, not locks.
//!
//! # Modules
//!
//! - [`villager`] -- Per-villager owning tasks, commands, and handles
//! - [`directory`] -- The world registry implementing `VillagerDirectory`
//! - [`error`] -- Registry-level errors

pub mod directory;
pub mod error;
pub mod villager;

pub use directory::WorldDirectory;
pub use error::WorldError;
pub use villager::{VillagerCommand, VillagerHandle};
