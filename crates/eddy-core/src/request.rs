//! External request types handled by the simulation controller.

/// A request submitted by an external caller.
///
/// The transport that delivers requests (socket, event channel, test
/// harness) is an external collaborator; this enum is the
/// transport-agnostic boundary. Every handled request advances the
/// simulation exactly one tick — there is no timer-driven stepping.
///
/// # Examples
///
/// ```
/// use eddy_core::Request;
///
/// // Reset to the default grid size and advance one tick.
/// let start = Request::StartSimulation { grid_size: None };
///
/// // Inject density at cell (3, 7), then advance one tick.
/// let force = Request::AddForce { x: 3, y: 7 };
///
/// assert!(matches!(start, Request::StartSimulation { grid_size: None }));
/// assert!(matches!(force, Request::AddForce { x: 3, y: 7 }));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// Resize/reset the grid and run one update step.
    ///
    /// `None` selects the configured default edge length. The reset
    /// discards all prior field contents; nothing is migrated.
    StartSimulation {
        /// Requested grid edge length, if any.
        grid_size: Option<u32>,
    },
    /// Inject one unit of density at a cell, then run one update step.
    ///
    /// Coordinates outside the current grid are silently ignored; the
    /// update step still runs and a snapshot is still produced.
    AddForce {
        /// Row index of the target cell.
        x: i32,
        /// Column index of the target cell.
        y: i32,
    },
}
