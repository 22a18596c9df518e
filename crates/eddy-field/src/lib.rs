//! Field storage for Eddy simulations.
//!
//! [`FieldGrid`] owns the density field and the reserved velocity
//! fields for one grid incarnation; [`DensitySnapshot`] is the
//! immutable full-grid copy handed to observers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;
pub mod snapshot;

pub use grid::FieldGrid;
pub use snapshot::DensitySnapshot;
