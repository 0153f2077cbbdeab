//! Full-stack census integration tests: real owning tasks behind a
//! [`WorldDirectory`], collected by a [`WorldCensus`], published into a
//! [`PopulationGauge`].

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use hamlet_census::{CensusConfig, CensusError, GroupingKey, WorldCensus};
use hamlet_metrics::PopulationGauge;
use hamlet_types::{MIN_LEVEL, Profession, VillagerKind, VillagerSnapshot, WorldName};
use hamlet_world::WorldDirectory;

fn key(kind: VillagerKind, profession: Option<Profession>, level: u8) -> GroupingKey {
    GroupingKey::from_snapshot(VillagerSnapshot::new(kind, profession, level))
}

fn build() -> (
    Arc<WorldDirectory>,
    Arc<PopulationGauge>,
    WorldCensus<WorldDirectory, PopulationGauge>,
) {
    let directory = Arc::new(WorldDirectory::new());
    let gauge = Arc::new(PopulationGauge::new());
    let census = WorldCensus::new(
        Arc::clone(&directory),
        Arc::clone(&gauge),
        &CensusConfig::default(),
    );
    (directory, gauge, census)
}

#[tokio::test]
async fn census_counts_a_live_population() {
    let world = WorldName::from("overworld");
    let (directory, gauge, census) = build();
    directory.register_world(world.clone()).unwrap();
    directory
        .spawn_villager(&world, VillagerKind::Plains, Some(Profession::Farmer), 3)
        .unwrap();
    directory
        .spawn_villager(&world, VillagerKind::Plains, Some(Profession::Farmer), 3)
        .unwrap();
    directory
        .spawn_villager(&world, VillagerKind::Desert, None, MIN_LEVEL)
        .unwrap();

    let summary = census.collect(&world).await.unwrap();

    assert_eq!(summary.enumerated, 3);
    assert_eq!(summary.observed, 3);
    assert_eq!(summary.rows, 2);
    assert_eq!(
        gauge
            .value(&world, key(VillagerKind::Plains, Some(Profession::Farmer), 3))
            .unwrap(),
        Some(2)
    );
    assert_eq!(
        gauge
            .value(&world, key(VillagerKind::Desert, None, MIN_LEVEL))
            .unwrap(),
        Some(1)
    );
}

#[tokio::test]
async fn despawn_is_reflected_by_the_next_cycle() {
    let world = WorldName::from("overworld");
    let (directory, gauge, census) = build();
    directory.register_world(world.clone()).unwrap();
    let id = directory
        .spawn_villager(&world, VillagerKind::Swamp, None, MIN_LEVEL)
        .unwrap();

    census.collect(&world).await.unwrap();
    assert_eq!(
        gauge
            .value(&world, key(VillagerKind::Swamp, None, MIN_LEVEL))
            .unwrap(),
        Some(1)
    );

    directory.despawn_villager(&world, id).await.unwrap();
    let summary = census.collect(&world).await.unwrap();

    assert_eq!(summary.rows, 0);
    assert!(gauge.rows().unwrap().is_empty());
}

#[tokio::test]
async fn profession_and_promotion_move_the_published_row() {
    let world = WorldName::from("overworld");
    let (directory, gauge, census) = build();
    directory.register_world(world.clone()).unwrap();
    let id = directory
        .spawn_villager(&world, VillagerKind::Taiga, None, MIN_LEVEL)
        .unwrap();

    census.collect(&world).await.unwrap();
    assert_eq!(
        gauge
            .value(&world, key(VillagerKind::Taiga, None, MIN_LEVEL))
            .unwrap(),
        Some(1)
    );

    directory
        .assign_profession(&world, id, Profession::Fisherman)
        .await
        .unwrap();
    directory.promote(&world, id).await.unwrap();
    census.collect(&world).await.unwrap();

    assert_eq!(
        gauge
            .value(&world, key(VillagerKind::Taiga, None, MIN_LEVEL))
            .unwrap(),
        None
    );
    assert_eq!(
        gauge
            .value(&world, key(VillagerKind::Taiga, Some(Profession::Fisherman), 2))
            .unwrap(),
        Some(1)
    );
}

#[tokio::test]
async fn concurrent_cycles_for_distinct_worlds_are_both_correct() {
    let overworld = WorldName::from("overworld");
    let outpost = WorldName::from("outpost");
    let (directory, gauge, census) = build();
    directory.register_world(overworld.clone()).unwrap();
    directory.register_world(outpost.clone()).unwrap();
    for _ in 0..4 {
        directory
            .spawn_villager(&overworld, VillagerKind::Plains, Some(Profession::Mason), 2)
            .unwrap();
    }
    directory
        .spawn_villager(&outpost, VillagerKind::Jungle, None, MIN_LEVEL)
        .unwrap();

    let (first, second) = tokio::join!(census.collect(&overworld), census.collect(&outpost));
    first.unwrap();
    second.unwrap();

    assert_eq!(
        gauge
            .value(&overworld, key(VillagerKind::Plains, Some(Profession::Mason), 2))
            .unwrap(),
        Some(4)
    );
    assert_eq!(
        gauge
            .value(&outpost, key(VillagerKind::Jungle, None, MIN_LEVEL))
            .unwrap(),
        Some(1)
    );
    assert_eq!(gauge.rows().unwrap().len(), 2);
}

#[tokio::test]
async fn sweeping_an_unregistered_world_fails_that_world_only() {
    let known = WorldName::from("overworld");
    let unknown = WorldName::from("limbo");
    let (directory, gauge, census) = build();
    directory.register_world(known.clone()).unwrap();
    directory
        .spawn_villager(&known, VillagerKind::Snow, None, MIN_LEVEL)
        .unwrap();

    let results = census.collect_all(&[known.clone(), unknown]).await;

    assert!(results.first().unwrap().is_ok());
    assert!(matches!(
        results.get(1),
        Some(Err(CensusError::Directory { .. }))
    ));
    assert_eq!(
        gauge
            .value(&known, key(VillagerKind::Snow, None, MIN_LEVEL))
            .unwrap(),
        Some(1)
    );
}
