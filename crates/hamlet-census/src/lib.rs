//! Census core for the Hamlet workspace.
//!
//! This crate owns the collection-and-aggregation engine: deriving a
//! [`GroupingKey`] per villager snapshot, fanning out ownership-confined
//! reads across a world's population, joining them, and atomically
//! replacing the published label rows with the freshly counted ones.
//!
//! The collaborators it depends on are expressed as traits and implemented
//! elsewhere: [`VillagerDirectory`] (the host scheduler/entity directory,
//! see `hamlet-world`) and [`PopulationSink`] (the published row store,
//! see `hamlet-metrics`).
//!
//! # Modules
//!
//! - [`grouping`] -- Grouping key extraction and label projection
//! - [`collector`] -- The fan-out/join/aggregate/publish cycle
//! - [`directory`] -- Directory contract consumed by the collector
//! - [`sink`] -- Sink contract consumed by the collector
//! - [`config`] -- Census collection parameters
//! - [`error`] -- Cycle-level error taxonomy

pub mod collector;
pub mod config;
pub mod directory;
pub mod error;
pub mod grouping;
pub mod sink;

pub use collector::{CensusSummary, WorldCensus};
pub use config::CensusConfig;
pub use directory::{DirectoryError, VillagerDirectory};
pub use error::CensusError;
pub use grouping::GroupingKey;
pub use sink::{PopulationSink, SinkError};
