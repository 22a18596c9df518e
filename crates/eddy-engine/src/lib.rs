//! The Eddy simulation engine.
//!
//! [`SimulationController`] orchestrates the request-driven state
//! machine: optionally resize or inject, advance one tick, snapshot,
//! and push the result to every subscribed observer. All mutation is
//! serialized behind a single lock, so each request executes as one
//! atomic unit against a fully up-to-date grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod egress;

pub use config::SimulationConfig;
pub use controller::SimulationController;
pub use egress::{ObserverHub, SimulationUpdate};
