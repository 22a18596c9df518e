//! Shared fixtures for Eddy benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use eddy_engine::{SimulationConfig, SimulationController};
use eddy_field::FieldGrid;

/// A controller over a zeroed grid of the given edge length.
pub fn zeroed_controller(size: u32) -> SimulationController {
    let config = SimulationConfig {
        default_grid_size: size,
        seed: 42,
        ..Default::default()
    };
    let grid = FieldGrid::zeroed(size).expect("bench grid size is valid");
    SimulationController::from_grid(config, grid).expect("bench config is valid")
}
