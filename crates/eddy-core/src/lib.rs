//! Core types for the Eddy density-field simulation workspace.
//!
//! This is the leaf crate with zero dependencies. It defines the
//! fundamental abstractions shared by the rest of the workspace:
//! tick and generation IDs, the external request types, and the
//! error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod request;

pub use error::{ConfigError, OperatorError, RequestError};
pub use id::{GridGenerationId, TickId};
pub use request::Request;
