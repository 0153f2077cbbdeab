//! Published metric rows for the Hamlet census.
//!
//! This crate provides the sink collaborator the census publishes into:
//! an in-memory labelled gauge holding the current `villagers_total` label
//! set, plus the string-label row projection an export layer scrapes.
//!
//! # Modules
//!
//! - [`gauge`] -- The population gauge and its row projection

pub mod gauge;

pub use gauge::{LABEL_NAMES, METRIC_HELP, METRIC_NAME, PopulationGauge, PopulationRow};
