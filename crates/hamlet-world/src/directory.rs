//! World registry and entity directory.
//!
//! [`WorldDirectory`] tracks which villagers live in which world and hands
//! out [`VillagerHandle`]s to their owning tasks. It implements the census
//! crate's [`VillagerDirectory`] contract: enumeration is a point-in-time
//! handle snapshot, and reads are delegated to the owning task's mailbox.

use std::collections::BTreeMap;
use std::sync::RwLock;

use hamlet_census::{DirectoryError, VillagerDirectory};
use hamlet_types::{Profession, VillagerId, VillagerKind, VillagerSnapshot, WorldName};
use tracing::{debug, info};

use crate::error::WorldError;
use crate::villager::{self, VillagerCommand, VillagerHandle, VillagerState};

/// Per-world handle maps, keyed by villager identity.
type Registry = BTreeMap<WorldName, BTreeMap<VillagerId, VillagerHandle>>;

/// Registry of running worlds and their villager owning tasks.
///
/// The registry lock is only ever held for map bookkeeping -- never across
/// an await -- so enumeration cannot block on a slow villager and a stalled
/// villager cannot block spawns or despawns.
#[derive(Debug, Default)]
pub struct WorldDirectory {
    /// Per-world handle maps, keyed by villager identity.
    worlds: RwLock<Registry>,
}

impl WorldDirectory {
    /// Create an empty directory.
    pub const fn new() -> Self {
        Self {
            worlds: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a world with no villagers.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateWorld`] if the name is already taken.
    pub fn register_world(&self, world: WorldName) -> Result<(), WorldError> {
        let mut worlds = self.write()?;
        if worlds.contains_key(&world) {
            return Err(WorldError::DuplicateWorld { world });
        }
        info!(world = %world, "world registered");
        worlds.insert(world, BTreeMap::new());
        Ok(())
    }

    /// Names of all registered worlds.
    pub fn worlds(&self) -> Result<Vec<WorldName>, WorldError> {
        Ok(self.read()?.keys().cloned().collect())
    }

    /// Spawn a villager into `world`, starting its owning task.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownWorld`] if the world is not registered.
    pub fn spawn_villager(
        &self,
        world: &WorldName,
        kind: VillagerKind,
        profession: Option<Profession>,
        level: u8,
    ) -> Result<VillagerId, WorldError> {
        let mut worlds = self.write()?;
        let population = worlds
            .get_mut(world)
            .ok_or_else(|| WorldError::UnknownWorld {
                world: world.clone(),
            })?;

        let id = VillagerId::new();
        let handle = villager::spawn(VillagerState::new(id, kind, profession, level));
        population.insert(id, handle);
        debug!(world = %world, villager = %id, kind = kind.label(), "villager spawned");
        Ok(id)
    }

    /// Remove a villager from `world` and stop its owning task.
    ///
    /// Observations already in the mailbox complete before the task stops;
    /// observations issued afterwards resolve absent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownWorld`] or [`WorldError::UnknownVillager`]
    /// if nothing is registered under the given keys.
    pub async fn despawn_villager(
        &self,
        world: &WorldName,
        villager: VillagerId,
    ) -> Result<(), WorldError> {
        let handle = {
            let mut worlds = self.write()?;
            let population = worlds
                .get_mut(world)
                .ok_or_else(|| WorldError::UnknownWorld {
                    world: world.clone(),
                })?;
            population
                .remove(&villager)
                .ok_or_else(|| WorldError::UnknownVillager {
                    world: world.clone(),
                    villager,
                })?
        };

        debug!(world = %world, villager = %villager, "villager despawned");
        handle.send(VillagerCommand::Despawn).await
    }

    /// Give a villager a trade profession.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the villager cannot be found or reached.
    pub async fn assign_profession(
        &self,
        world: &WorldName,
        villager: VillagerId,
        profession: Profession,
    ) -> Result<(), WorldError> {
        let handle = self.handle_for(world, villager)?;
        handle.send(VillagerCommand::Assign { profession }).await
    }

    /// Raise a villager's experience level by one.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the villager cannot be found or reached.
    pub async fn promote(
        &self,
        world: &WorldName,
        villager: VillagerId,
    ) -> Result<(), WorldError> {
        let handle = self.handle_for(world, villager)?;
        handle.send(VillagerCommand::Promote).await
    }

    /// Identities of all villagers currently registered in `world`.
    pub fn villager_ids(&self, world: &WorldName) -> Result<Vec<VillagerId>, WorldError> {
        self.read()?
            .get(world)
            .map(|population| population.keys().copied().collect())
            .ok_or_else(|| WorldError::UnknownWorld {
                world: world.clone(),
            })
    }

    /// Number of villagers currently registered in `world`.
    pub fn population_count(&self, world: &WorldName) -> Result<usize, WorldError> {
        self.read()?
            .get(world)
            .map(BTreeMap::len)
            .ok_or_else(|| WorldError::UnknownWorld {
                world: world.clone(),
            })
    }

    /// Clone one villager's handle out of the registry.
    fn handle_for(
        &self,
        world: &WorldName,
        villager: VillagerId,
    ) -> Result<VillagerHandle, WorldError> {
        self.read()?
            .get(world)
            .ok_or_else(|| WorldError::UnknownWorld {
                world: world.clone(),
            })?
            .get(&villager)
            .cloned()
            .ok_or_else(|| WorldError::UnknownVillager {
                world: world.clone(),
                villager,
            })
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Registry>, WorldError> {
        self.worlds.read().map_err(|_err| WorldError::RegistryPoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Registry>, WorldError> {
        self.worlds.write().map_err(|_err| WorldError::RegistryPoisoned)
    }
}

impl VillagerDirectory for WorldDirectory {
    type Handle = VillagerHandle;

    fn list_villagers(&self, world: &WorldName) -> Result<Vec<VillagerHandle>, DirectoryError> {
        let worlds = self
            .worlds
            .read()
            .map_err(|_err| DirectoryError::Internal {
                message: String::from("world registry lock poisoned"),
            })?;
        worlds
            .get(world)
            .map(|population| population.values().cloned().collect())
            .ok_or_else(|| DirectoryError::UnknownWorld {
                world: world.clone(),
            })
    }

    async fn read_on_owner(&self, handle: &VillagerHandle) -> Option<VillagerSnapshot> {
        handle.observe().await
    }
}
