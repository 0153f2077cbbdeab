//! Error types for the census engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and sweep execution.

/// Top-level error for the census engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// A world registry operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: hamlet_world::WorldError,
    },

    /// A census cycle failed.
    #[error("census error: {source}")]
    Census {
        /// The underlying census error.
        #[from]
        source: hamlet_census::CensusError,
    },

    /// Publishing to the gauge failed outside a census cycle.
    #[error("sink error: {source}")]
    Sink {
        /// The underlying sink error.
        #[from]
        source: hamlet_census::SinkError,
    },

    /// Population spawning failed.
    #[error("spawner error: {message}")]
    Spawner {
        /// Description of the spawner failure.
        message: String,
    },
}
