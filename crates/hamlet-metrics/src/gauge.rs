//! The in-memory labelled population gauge.
//!
//! [`PopulationGauge`] is the concrete [`PopulationSink`]: a row map from
//! `(world, grouping key)` to the last-set count, persisting across cycles
//! until the next overwrite or clear. An export layer scrapes it through
//! [`PopulationGauge::rows`], which projects each row into the string label
//! values the exposition format wants.

use std::collections::BTreeMap;
use std::sync::RwLock;

use hamlet_census::{GroupingKey, PopulationSink, SinkError};
use hamlet_types::WorldName;
use serde::Serialize;
use tracing::debug;

/// The metric name published rows belong to.
pub const METRIC_NAME: &str = "villagers_total";

/// Help text accompanying the metric on the scrape path.
pub const METRIC_HELP: &str =
    "Villagers total count, labelled by world, type, profession, and level";

/// Label names, in publication order.
pub const LABEL_NAMES: [&str; 4] = ["world", "type", "profession", "level"];

/// One published row, projected to string label values.
///
/// `level` is the decimal string form of the level; `type` and `profession`
/// are the lowercase stable identifiers from the villager taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationRow {
    /// The `world` label value.
    pub world: String,
    /// The `type` label value.
    #[serde(rename = "type")]
    pub kind: String,
    /// The `profession` label value.
    pub profession: String,
    /// The `level` label value.
    pub level: String,
    /// The row's count.
    pub count: u64,
}

/// The currently published label set for [`METRIC_NAME`].
#[derive(Debug, Default)]
pub struct PopulationGauge {
    /// Row map; the only state the external scrape path reads.
    rows: RwLock<BTreeMap<(WorldName, GroupingKey), u64>>,
}

impl PopulationGauge {
    /// Create a gauge with no published rows.
    pub const fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Project the current label set for the export layer.
    ///
    /// Rows come out ordered by world, then grouping key.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Poisoned`] if the row store lock is poisoned.
    pub fn rows(&self) -> Result<Vec<PopulationRow>, SinkError> {
        let rows = self.rows.read().map_err(|_err| SinkError::Poisoned)?;
        Ok(rows
            .iter()
            .map(|((world, key), count)| PopulationRow {
                world: world.to_string(),
                kind: key.kind_label().to_owned(),
                profession: key.profession_label().to_owned(),
                level: key.level_label(),
                count: *count,
            })
            .collect())
    }

    /// The count currently published for `(world, key)`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Poisoned`] if the row store lock is poisoned.
    pub fn value(&self, world: &WorldName, key: GroupingKey) -> Result<Option<u64>, SinkError> {
        let rows = self.rows.read().map_err(|_err| SinkError::Poisoned)?;
        Ok(rows.get(&(world.clone(), key)).copied())
    }
}

impl PopulationSink for PopulationGauge {
    fn set_labelled(
        &self,
        world: &WorldName,
        key: GroupingKey,
        count: u64,
    ) -> Result<(), SinkError> {
        let mut rows = self.rows.write().map_err(|_err| SinkError::Poisoned)?;
        rows.insert((world.clone(), key), count);
        Ok(())
    }

    fn clear_world(&self, world: &WorldName) -> Result<(), SinkError> {
        let mut rows = self.rows.write().map_err(|_err| SinkError::Poisoned)?;
        rows.retain(|(row_world, _key), _count| row_world != world);
        debug!(world = %world, "cleared published rows for world");
        Ok(())
    }

    fn clear_all(&self) -> Result<(), SinkError> {
        let mut rows = self.rows.write().map_err(|_err| SinkError::Poisoned)?;
        rows.clear();
        debug!("cleared all published rows");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hamlet_types::{Profession, VillagerKind, VillagerSnapshot};

    use super::*;

    fn key(kind: VillagerKind, profession: Option<Profession>, level: u8) -> GroupingKey {
        GroupingKey::from_snapshot(VillagerSnapshot::new(kind, profession, level))
    }

    #[test]
    fn set_labelled_overwrites_the_existing_row() {
        let gauge = PopulationGauge::new();
        let world = WorldName::from("overworld");
        let farmer = key(VillagerKind::Plains, Some(Profession::Farmer), 3);

        gauge.set_labelled(&world, farmer, 2).unwrap();
        gauge.set_labelled(&world, farmer, 5).unwrap();

        assert_eq!(gauge.value(&world, farmer).unwrap(), Some(5));
        assert_eq!(gauge.rows().unwrap().len(), 1);
    }

    #[test]
    fn clear_world_leaves_other_worlds_untouched() {
        let gauge = PopulationGauge::new();
        let overworld = WorldName::from("overworld");
        let outpost = WorldName::from("outpost");
        let farmer = key(VillagerKind::Plains, Some(Profession::Farmer), 3);
        gauge.set_labelled(&overworld, farmer, 2).unwrap();
        gauge.set_labelled(&outpost, farmer, 1).unwrap();

        gauge.clear_world(&overworld).unwrap();

        assert_eq!(gauge.value(&overworld, farmer).unwrap(), None);
        assert_eq!(gauge.value(&outpost, farmer).unwrap(), Some(1));
    }

    #[test]
    fn clear_all_removes_every_row() {
        let gauge = PopulationGauge::new();
        let overworld = WorldName::from("overworld");
        let outpost = WorldName::from("outpost");
        gauge
            .set_labelled(&overworld, key(VillagerKind::Snow, None, 1), 4)
            .unwrap();
        gauge
            .set_labelled(&outpost, key(VillagerKind::Desert, None, 1), 1)
            .unwrap();

        gauge.clear_all().unwrap();

        assert!(gauge.rows().unwrap().is_empty());
    }

    #[test]
    fn rows_project_lowercase_labels_and_decimal_levels() {
        let gauge = PopulationGauge::new();
        let world = WorldName::from("overworld");
        gauge
            .set_labelled(&world, key(VillagerKind::Taiga, Some(Profession::Fisherman), 4), 7)
            .unwrap();
        gauge
            .set_labelled(&world, key(VillagerKind::Desert, None, 1), 2)
            .unwrap();

        let rows = gauge.rows().unwrap();

        assert_eq!(rows.len(), 2);
        let first = rows.first().unwrap();
        assert_eq!(first.kind, "desert");
        assert_eq!(first.profession, "none");
        assert_eq!(first.level, "1");
        assert_eq!(first.count, 2);
        let second = rows.get(1).unwrap();
        assert_eq!(second.kind, "taiga");
        assert_eq!(second.profession, "fisherman");
        assert_eq!(second.level, "4");
        assert_eq!(second.count, 7);
    }

    #[test]
    fn row_serializes_with_the_published_label_names() {
        let row = PopulationRow {
            world: String::from("overworld"),
            kind: String::from("plains"),
            profession: String::from("farmer"),
            level: String::from("3"),
            count: 2,
        };

        let json = serde_json::to_value(&row).unwrap();

        for label in LABEL_NAMES {
            assert!(json.get(label).is_some(), "missing label: {label}");
        }
        assert_eq!(json.get("type").unwrap(), "plains");
    }
}
