//! Population sink contract consumed by the census.
//!
//! The sink holds the currently published label rows scraped by the
//! monitoring system. The census only ever drives it through the
//! clear-then-write discipline: remove the collected world's stale rows,
//! then write one row per observed grouping key.

use hamlet_types::WorldName;

use crate::grouping::GroupingKey;

/// Errors that can occur while publishing rows.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The sink's row store lock was poisoned by a panicking writer.
    #[error("published row store lock poisoned")]
    Poisoned,
}

/// The store of currently published metric label rows.
///
/// Implementations persist rows across cycles until the next overwrite or
/// clear; this is the only state the external scrape path reads.
pub trait PopulationSink {
    /// Upsert the row for `(world, key)` to `count`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the row cannot be stored. Rows already
    /// written in the same cycle stand; the next cycle self-heals.
    fn set_labelled(
        &self,
        world: &WorldName,
        key: GroupingKey,
        count: u64,
    ) -> Result<(), SinkError>;

    /// Remove every row previously published for `world`.
    ///
    /// Called at the start of each publication so groupings that vanished
    /// entirely cannot linger with stale nonzero values. Rows for other
    /// worlds are untouched.
    fn clear_world(&self, world: &WorldName) -> Result<(), SinkError>;

    /// Remove every row for this metric across all worlds.
    ///
    /// Never called inside a cycle; used for full resets such as shutdown.
    fn clear_all(&self) -> Result<(), SinkError>;
}
