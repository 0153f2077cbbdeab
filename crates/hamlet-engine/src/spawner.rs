//! Seed population spawner and per-sweep population churn.
//!
//! At startup the spawner registers each configured world and fills it with
//! villagers of random kind, profession, and level, deterministically from
//! the configured seed. Between sweeps the engine applies a little churn --
//! assignments, promotions, the occasional despawn -- so successive cycles
//! observe genuinely changed populations.

use hamlet_types::{MAX_LEVEL, MIN_LEVEL, Profession, VillagerKind, WorldName};
use hamlet_world::WorldDirectory;
use rand::Rng;
use rand::prelude::IndexedRandom as _;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::PopulationConfig;
use crate::error::EngineError;

/// Chance a freshly spawned villager holds no profession.
const PROFESSIONLESS_CHANCE: f64 = 0.25;

/// Per-villager chance of a profession change during churn.
const CHURN_ASSIGN_CHANCE: f64 = 0.2;

/// Per-villager chance of a promotion during churn.
const CHURN_PROMOTE_CHANCE: f64 = 0.2;

/// Per-villager chance of despawning during churn.
const CHURN_DESPAWN_CHANCE: f64 = 0.05;

/// The output of the seed spawner.
#[derive(Debug)]
pub struct SpawnSummary {
    /// Worlds registered, in configuration order.
    pub worlds: Vec<WorldName>,
    /// Total villagers spawned across all worlds.
    pub villagers: u64,
}

/// Register every configured world and spawn its seed villagers.
///
/// # Errors
///
/// Returns [`EngineError`] if a world cannot be registered or a villager
/// cannot be spawned.
pub fn spawn_population(
    config: &PopulationConfig,
    directory: &WorldDirectory,
    rng: &mut StdRng,
) -> Result<SpawnSummary, EngineError> {
    let mut worlds = Vec::with_capacity(config.worlds.len());
    let mut villagers: u64 = 0;

    for world_config in &config.worlds {
        let world = WorldName::new(&world_config.name);
        directory.register_world(world.clone())?;

        for _ in 0..world_config.villagers {
            spawn_random_villager(directory, &world, rng)?;
            villagers = villagers.saturating_add(1);
        }

        info!(
            world = %world,
            villagers = world_config.villagers,
            "seed population spawned"
        );
        worlds.push(world);
    }

    Ok(SpawnSummary { worlds, villagers })
}

/// Spawn one villager with random kind, profession, and level.
fn spawn_random_villager(
    directory: &WorldDirectory,
    world: &WorldName,
    rng: &mut StdRng,
) -> Result<(), EngineError> {
    let kind = pick(&VillagerKind::ALL, rng)?;
    let profession = if rng.random_bool(PROFESSIONLESS_CHANCE) {
        None
    } else {
        Some(pick(&Profession::ALL, rng)?)
    };
    let level = rng.random_range(MIN_LEVEL..=MAX_LEVEL);

    directory.spawn_villager(world, kind, profession, level)?;
    Ok(())
}

/// Apply random churn to every world's population.
///
/// Each villager independently has a small chance of taking up a new
/// profession, being promoted, or despawning. Villagers that despawned
/// concurrently are skipped rather than treated as failures.
///
/// # Errors
///
/// Returns [`EngineError`] if a world's population cannot be enumerated.
pub async fn churn_population(
    directory: &WorldDirectory,
    worlds: &[WorldName],
    rng: &mut StdRng,
) -> Result<(), EngineError> {
    for world in worlds {
        let mut changed: u64 = 0;
        for villager in directory.villager_ids(world)? {
            if rng.random_bool(CHURN_DESPAWN_CHANCE) {
                directory.despawn_villager(world, villager).await?;
                changed = changed.saturating_add(1);
                continue;
            }
            if rng.random_bool(CHURN_ASSIGN_CHANCE) {
                let profession = pick(&Profession::ALL, rng)?;
                if directory
                    .assign_profession(world, villager, profession)
                    .await
                    .is_ok()
                {
                    changed = changed.saturating_add(1);
                }
            }
            if rng.random_bool(CHURN_PROMOTE_CHANCE)
                && directory.promote(world, villager).await.is_ok()
            {
                changed = changed.saturating_add(1);
            }
        }
        debug!(world = %world, changed, "population churn applied");
    }
    Ok(())
}

/// Pick a uniformly random element from a non-empty slice.
fn pick<T: Copy>(choices: &[T], rng: &mut StdRng) -> Result<T, EngineError> {
    choices
        .choose(rng)
        .copied()
        .ok_or_else(|| EngineError::Spawner {
            message: String::from("empty choice pool"),
        })
}
