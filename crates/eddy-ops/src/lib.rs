//! Tick operators for Eddy simulations.
//!
//! The [`Operator`] trait is the seam the controller's per-tick
//! pipeline is built from; [`StochasticDecay`] is the one update rule
//! currently shipped. [`ForceInjector`] applies caller-triggered point
//! perturbations and runs before the pipeline, not inside it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod decay;
pub mod force;
pub mod operator;

pub use decay::StochasticDecay;
pub use force::ForceInjector;
pub use operator::Operator;
