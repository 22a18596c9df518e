//! The [`Operator`] trait.

use eddy_core::{OperatorError, TickId};
use eddy_field::FieldGrid;

/// A modular operator in the controller's per-tick pipeline.
///
/// Operators run in sequence once per handled request, each mutating
/// the grid in place. The update rule currently shipped is
/// cell-independent; richer physics (neighbor-coupled diffusion,
/// velocity advection over the reserved fields) arrives as additional
/// implementations of this trait, never by widening an existing
/// operator's contract.
///
/// # Contract
///
/// - `apply()` must be deterministic for a given `(grid, tick)` pair;
///   stochastic operators derive their stream from the tick.
/// - `&self` — operators are stateless; mutable state lives in the grid.
///
/// # Object safety
///
/// This trait is object-safe; the controller stores its pipeline as
/// `Vec<Box<dyn Operator>>`.
///
/// # Examples
///
/// A minimal operator that rescales the density field:
///
/// ```
/// use eddy_core::{OperatorError, TickId};
/// use eddy_field::FieldGrid;
/// use eddy_ops::Operator;
///
/// struct Rescale {
///     factor: f32,
/// }
///
/// impl Operator for Rescale {
///     fn name(&self) -> &str { "rescale" }
///
///     fn apply(&self, grid: &mut FieldGrid, _tick: TickId) -> Result<(), OperatorError> {
///         for d in grid.density_mut() {
///             *d *= self.factor;
///         }
///         Ok(())
///     }
/// }
///
/// let mut grid = FieldGrid::zeroed(4).unwrap();
/// grid.density_mut()[0] = 2.0;
/// let op = Rescale { factor: 0.5 };
/// op.apply(&mut grid, TickId(1)).unwrap();
/// assert_eq!(grid.density()[0], 1.0);
/// ```
pub trait Operator: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Advance the grid by one tick.
    ///
    /// Called once per handled request, in pipeline order.
    fn apply(&self, grid: &mut FieldGrid, tick: TickId) -> Result<(), OperatorError>;
}
