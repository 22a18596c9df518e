//! Strongly-typed identifiers for ticks and grid generations.

use std::fmt;

/// Monotonically increasing tick counter.
///
/// Incremented each time the simulation advances one step. The grid
/// created at construction time is tick 0; the snapshot produced by
/// the first handled request carries `TickId(1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies one incarnation of the simulation grid.
///
/// Bumped every time the grid is replaced wholesale by a resize/reset.
/// Snapshots carry the generation they were taken from, so an observer
/// can tell a post-resize field apart from a same-sized predecessor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridGenerationId(pub u64);

impl GridGenerationId {
    /// The generation following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for GridGenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GridGenerationId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
