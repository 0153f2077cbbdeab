//! Typed configuration for census collection.
//!
//! The census section of `hamlet-config.yaml` maps onto [`CensusConfig`].
//! All fields have defaults, so an absent section yields a working
//! configuration.

use std::time::Duration;

use serde::Deserialize;

/// Census collection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CensusConfig {
    /// Maximum milliseconds to wait for one villager's owning context to
    /// answer an observation before dropping that contribution.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Milliseconds between full multi-world sweeps.
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,

    /// Maximum number of sweeps before the engine stops (0 = unlimited).
    #[serde(default)]
    pub max_sweeps: u64,
}

impl CensusConfig {
    /// The per-villager read timeout as a [`Duration`].
    pub const fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// The sweep interval as a [`Duration`].
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: default_read_timeout_ms(),
            sweep_interval_ms: default_sweep_interval_ms(),
            max_sweeps: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_read_timeout_ms() -> u64 {
    250
}

const fn default_sweep_interval_ms() -> u64 {
    10_000
}
