//! Error types for the Eddy simulation workspace, organized by
//! subsystem: configuration (grid lifecycle), operator execution,
//! and request handling.
//!
//! Out-of-range force injection is deliberately absent from this
//! taxonomy: it is a designed silent no-op, not a fault.

use std::error::Error;
use std::fmt;

/// Errors from grid construction, resize, or engine configuration.
///
/// All variants are recoverable: the offending request is rejected and
/// prior state is left untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Requested grid edge length is zero.
    EmptyGrid,
    /// Requested grid edge length exceeds the coordinate arithmetic bound.
    GridTooLarge {
        /// The requested edge length.
        size: u32,
        /// The maximum supported edge length.
        max: u32,
    },
    /// Observer queue capacity is zero.
    ZeroObserverCapacity,
    /// An operator in the pipeline failed validation at build time.
    InvalidOperator {
        /// Description of the validation failure.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have a positive edge length"),
            Self::GridTooLarge { size, max } => {
                write!(f, "grid edge length {size} exceeds maximum of {max}")
            }
            Self::ZeroObserverCapacity => {
                write!(f, "observer queue capacity must be at least 1")
            }
            Self::InvalidOperator { reason } => {
                write!(f, "invalid operator: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from individual operator execution.
///
/// Returned by `Operator::apply()` and wrapped in
/// [`RequestError::Operator`] by the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperatorError {
    /// The operator's apply function failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for OperatorError {}

/// Errors surfaced to a caller whose request could not produce a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestError {
    /// The request carried an invalid configuration (e.g. a zero grid
    /// size). Prior state is intact; other callers are unaffected.
    Config(ConfigError),
    /// An operator failed while advancing the tick.
    Operator {
        /// Name of the failing operator.
        name: String,
        /// The underlying operator error.
        reason: OperatorError,
    },
    /// The shared simulation state was poisoned by a panic in an earlier
    /// request. Fatal to this request: failing fast beats handing out a
    /// possibly half-updated snapshot.
    StatePoisoned,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration rejected: {e}"),
            Self::Operator { name, reason } => {
                write!(f, "operator '{name}' failed: {reason}")
            }
            Self::StatePoisoned => write!(f, "simulation state poisoned by a prior panic"),
        }
    }
}

impl Error for RequestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Operator { reason, .. } => Some(reason),
            Self::StatePoisoned => None,
        }
    }
}

impl From<ConfigError> for RequestError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_offending_size() {
        let e = ConfigError::GridTooLarge {
            size: 70_000,
            max: 46_340,
        };
        let msg = e.to_string();
        assert!(msg.contains("70000"));
        assert!(msg.contains("46340"));
    }

    #[test]
    fn request_error_chains_to_source() {
        let e = RequestError::Operator {
            name: "stochastic_decay".into(),
            reason: OperatorError::ExecutionFailed {
                reason: "buffer length mismatch".into(),
            },
        };
        let source = e.source().expect("operator errors carry a source");
        assert!(source.to_string().contains("buffer length mismatch"));
    }

    #[test]
    fn config_error_converts_into_request_error() {
        let e: RequestError = ConfigError::EmptyGrid.into();
        assert_eq!(e, RequestError::Config(ConfigError::EmptyGrid));
    }
}
