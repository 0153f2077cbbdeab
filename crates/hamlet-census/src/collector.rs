//! The census cycle: fan-out, join, aggregate, publish.
//!
//! One [`WorldCensus::collect`] call is one cycle for one world:
//!
//! 1. **Enumerate** -- take a point-in-time membership snapshot from the
//!    directory.
//! 2. **Fan out** -- issue one ownership-confined read per villager without
//!    awaiting prior ones, so wall-clock cost is bounded by the slowest
//!    single owning context rather than the sum.
//! 3. **Join** -- suspend on a full barrier until every read completes or
//!    times out. Nothing is published before the barrier clears.
//! 4. **Aggregate** -- fold surviving snapshots into counts per
//!    [`GroupingKey`].
//! 5. **Publish** -- under the publish lock, clear the world's stale rows
//!    and write one row per observed key.
//!
//! A villager whose read resolves absent or times out is a dropped
//! contribution, never a cycle failure.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use hamlet_types::WorldName;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::CensusConfig;
use crate::directory::VillagerDirectory;
use crate::error::CensusError;
use crate::grouping::GroupingKey;
use crate::sink::PopulationSink;

/// Summary of a single completed census cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CensusSummary {
    /// The world this cycle collected.
    pub world: WorldName,
    /// Number of villagers enumerated at the start of the cycle.
    pub enumerated: usize,
    /// Number of reads that completed with a snapshot.
    pub observed: usize,
    /// Number of reads dropped (despawn race or timeout).
    pub dropped: usize,
    /// Number of distinct grouping keys published.
    pub rows: usize,
    /// When publication finished.
    pub completed_at: DateTime<Utc>,
}

/// The per-world collection-and-aggregation engine.
///
/// Holds the directory it enumerates from, the sink it publishes into, and
/// a publish lock serializing the clear-then-write window across concurrent
/// cycles. [`collect`] is safe to call repeatedly and concurrently for
/// distinct worlds: per-world clearing keys cycles into disjoint row
/// spaces, and the lock prevents one cycle's clear interleaving with
/// another's writes.
///
/// [`collect`]: WorldCensus::collect
pub struct WorldCensus<D, S> {
    /// Source of villager handles and ownership-confined reads.
    directory: Arc<D>,
    /// Destination for published label rows.
    sink: Arc<S>,
    /// Bound on each individual villager read.
    read_timeout: Duration,
    /// Serializes the clear-then-write publication window.
    publish_lock: Mutex<()>,
}

impl<D, S> WorldCensus<D, S>
where
    D: VillagerDirectory,
    S: PopulationSink,
{
    /// Create a census over the given directory and sink.
    pub fn new(directory: Arc<D>, sink: Arc<S>, config: &CensusConfig) -> Self {
        Self {
            directory,
            sink,
            read_timeout: config.read_timeout(),
            publish_lock: Mutex::new(()),
        }
    }

    /// Run one census cycle for `world`.
    ///
    /// On success the sink holds exactly one row per distinct grouping key
    /// observed this cycle, and no other row for `world`.
    ///
    /// # Errors
    ///
    /// Returns [`CensusError::Directory`] if enumeration fails (nothing is
    /// published; prior rows remain), or [`CensusError::Sink`] if a row
    /// write fails (rows already written this cycle stand; the next
    /// successful cycle self-heals).
    pub async fn collect(&self, world: &WorldName) -> Result<CensusSummary, CensusError> {
        let handles = self.directory.list_villagers(world)?;
        let enumerated = handles.len();

        // Fire all reads before awaiting any, then join on the full set.
        let reads = handles.iter().map(|handle| async move {
            match tokio::time::timeout(self.read_timeout, self.directory.read_on_owner(handle))
                .await
            {
                Ok(Some(snapshot)) => Some(snapshot),
                Ok(None) => {
                    debug!(world = %world, "villager despawned before read, dropping contribution");
                    None
                }
                Err(_elapsed) => {
                    debug!(
                        world = %world,
                        read_timeout = ?self.read_timeout,
                        "villager read timed out, dropping contribution"
                    );
                    None
                }
            }
        });
        let results = join_all(reads).await;

        let mut counts: BTreeMap<GroupingKey, u64> = BTreeMap::new();
        let mut observed: usize = 0;
        for snapshot in results.into_iter().flatten() {
            observed = observed.saturating_add(1);
            let slot = counts.entry(GroupingKey::from_snapshot(snapshot)).or_insert(0);
            *slot = slot.saturating_add(1);
        }

        let dropped = enumerated.saturating_sub(observed);
        if dropped > 0 {
            warn!(
                world = %world,
                enumerated,
                dropped,
                "some villager reads did not complete this cycle"
            );
        }

        let rows = counts.len();
        {
            let _publish = self.publish_lock.lock().await;
            self.sink.clear_world(world)?;
            for (&key, &count) in &counts {
                self.sink.set_labelled(world, key, count)?;
            }
        }

        info!(world = %world, enumerated, observed, dropped, rows, "census cycle published");

        Ok(CensusSummary {
            world: world.clone(),
            enumerated,
            observed,
            dropped,
            rows,
            completed_at: Utc::now(),
        })
    }

    /// Run one cycle per world, concurrently.
    ///
    /// Returns one result per world in input order. A failed cycle for one
    /// world never prevents the others from completing.
    pub async fn collect_all(
        &self,
        worlds: &[WorldName],
    ) -> Vec<Result<CensusSummary, CensusError>> {
        join_all(worlds.iter().map(|world| self.collect(world))).await
    }
}

impl<D, S> std::fmt::Debug for WorldCensus<D, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldCensus")
            .field("read_timeout_ms", &self.read_timeout.as_millis())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
