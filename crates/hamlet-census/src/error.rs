//! Error taxonomy for census cycles.
//!
//! Transient per-villager read failures (despawn races, timeouts) never
//! appear here -- they are recovered locally by exclusion from the count.
//! A [`CensusError`] aborts at most the one world's cycle it occurred in;
//! previously published rows remain visible until the next successful
//! cycle overwrites them.

use crate::directory::DirectoryError;
use crate::sink::SinkError;

/// Errors that can fail a census cycle for one world.
#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    /// Enumerating the world's villagers failed; nothing was published.
    #[error("directory error: {source}")]
    Directory {
        /// The underlying directory error.
        #[from]
        source: DirectoryError,
    },

    /// Publishing rows failed; rows written earlier in the cycle stand.
    #[error("sink error: {source}")]
    Sink {
        /// The underlying sink error.
        #[from]
        source: SinkError,
    },
}
