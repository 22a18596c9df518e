//! Eddy: a request-driven density-field simulation engine.
//!
//! Eddy maintains a square 2D scalar density field (plus reserved
//! velocity fields), advances it one tick per external request under a
//! decay + stochastic forcing rule, accepts point density injections,
//! and pushes a full-grid snapshot to every observer after each
//! update. This is the top-level facade crate that re-exports the
//! public API from all Eddy sub-crates; for most users, adding `eddy`
//! as a single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use eddy::prelude::*;
//!
//! // A controller with a randomized 16×16 starting grid.
//! let controller = SimulationController::new(SimulationConfig {
//!     default_grid_size: 16,
//!     seed: 42,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! // Observers get every update pushed to them.
//! let observer = controller.subscribe();
//!
//! // Reset to an 8×8 grid and advance one tick.
//! let snapshot = controller
//!     .handle(Request::StartSimulation { grid_size: Some(8) })
//!     .unwrap();
//! assert_eq!(snapshot.size(), 8);
//!
//! // Inject density at a cell and advance another tick.
//! let snapshot = controller.handle(Request::AddForce { x: 3, y: 3 }).unwrap();
//! assert_eq!(snapshot.tick(), eddy::types::TickId(2));
//!
//! // Both updates arrived at the observer, full grid each time.
//! assert_eq!(observer.try_iter().count(), 2);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `eddy-core` | IDs, requests, error taxonomy |
//! | [`field`] | `eddy-field` | Grid storage and density snapshots |
//! | [`ops`] | `eddy-ops` | Operator trait, decay operator, force injection |
//! | [`engine`] | `eddy-engine` | Controller, configuration, observer egress |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, requests, and errors (`eddy-core`).
pub use eddy_core as types;

/// Grid field storage and snapshots (`eddy-field`).
pub use eddy_field as field;

/// Tick operators and force injection (`eddy-ops`).
pub use eddy_ops as ops;

/// Simulation controller and observer egress (`eddy-engine`).
pub use eddy_engine as engine;

/// The most commonly used types, re-exported for glob import.
pub mod prelude {
    pub use eddy_core::{ConfigError, Request, RequestError};
    pub use eddy_engine::{SimulationConfig, SimulationController, SimulationUpdate};
    pub use eddy_field::{DensitySnapshot, FieldGrid};
    pub use eddy_ops::{ForceInjector, Operator, StochasticDecay};
}
