//! Controller configuration and validation.

use eddy_core::ConfigError;
use eddy_field::FieldGrid;

/// Configuration for a [`SimulationController`](crate::SimulationController).
///
/// Validated once at construction; requests that carry their own grid
/// size are validated again per request, so a bad `StartSimulation`
/// can never take down a running controller.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Grid edge length used at construction and whenever a
    /// `StartSimulation` request omits one. Default: 100.
    pub default_grid_size: u32,
    /// Master seed. Every grid seed and the update operator's forcing
    /// stream derive from this, so a whole run is reproducible from one
    /// number.
    pub seed: u64,
    /// Per-observer queue capacity. A full queue drops that observer's
    /// update rather than blocking the tick path. Default: 64.
    pub observer_queue_capacity: usize,
}

impl SimulationConfig {
    /// Default grid edge length.
    pub const DEFAULT_GRID_SIZE: u32 = 100;
    /// Default per-observer queue capacity.
    pub const DEFAULT_OBSERVER_CAPACITY: usize = 64;

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyGrid`] / [`ConfigError::GridTooLarge`]
    /// for an invalid default grid size, and
    /// [`ConfigError::ZeroObserverCapacity`] for a zero queue capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.default_grid_size > FieldGrid::MAX_EDGE {
            return Err(ConfigError::GridTooLarge {
                size: self.default_grid_size,
                max: FieldGrid::MAX_EDGE,
            });
        }
        if self.observer_queue_capacity == 0 {
            return Err(ConfigError::ZeroObserverCapacity);
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_grid_size: Self::DEFAULT_GRID_SIZE,
            seed: 0,
            observer_queue_capacity: Self::DEFAULT_OBSERVER_CAPACITY,
        }
    }
}
