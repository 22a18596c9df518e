//! Caller-triggered point perturbations.
//!
//! Injection runs before the tick pipeline, not inside it: a request
//! perturbs the field first, then the update operator advances it.
//!
//! Out-of-range coordinates are a silent no-op: the injection is
//! skipped and the update proceeds, unlike the grid-size path, which
//! validates loudly. The asymmetry is part of the contract — no
//! clamping, no error.

use eddy_core::ConfigError;
use eddy_field::FieldGrid;

/// Applies a bounded point perturbation to the density field.
///
/// # Examples
///
/// ```
/// use eddy_field::FieldGrid;
/// use eddy_ops::ForceInjector;
///
/// let injector = ForceInjector::default();
/// let mut grid = FieldGrid::zeroed(4).unwrap();
///
/// injector.inject(&mut grid, 1, 2);
/// assert_eq!(grid.density()[grid.index(1, 2).unwrap()], 1.0);
///
/// // Out of range: nothing happens, nothing fails.
/// injector.inject(&mut grid, 9, 9);
/// assert_eq!(grid.density().iter().sum::<f32>(), 1.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ForceInjector {
    amount: f32,
}

impl ForceInjector {
    /// Default density increment per injection.
    pub const DEFAULT_AMOUNT: f32 = 1.0;

    /// Create an injector with a custom per-injection amount.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOperator`] if `amount` is negative
    /// or not finite — the injector only ever adds non-negative
    /// increments, which is what keeps density `>= 0` under the
    /// shipped operators.
    pub fn new(amount: f32) -> Result<Self, ConfigError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ConfigError::InvalidOperator {
                reason: format!("injection amount must be finite and >= 0, got {amount}"),
            });
        }
        Ok(Self { amount })
    }

    /// The per-injection density increment.
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Add [`amount`](Self::amount) to the density at `(x, y)`.
    ///
    /// Out-of-range coordinates are silently ignored; the grid is left
    /// bit-identical and no error is surfaced.
    pub fn inject(&self, grid: &mut FieldGrid, x: i32, y: i32) {
        if let Some(i) = grid.index(x, y) {
            grid.density_mut()[i] += self.amount;
        }
    }

    /// Add `(vx, vy)` to the reserved velocity fields at `(x, y)`.
    ///
    /// Same silently-ignore-out-of-range policy as [`inject`](Self::inject).
    /// The update operator never reads these fields; they accumulate
    /// for the future advection operator.
    pub fn inject_velocity(&self, grid: &mut FieldGrid, x: i32, y: i32, vx: f32, vy: f32) {
        if let Some(i) = grid.index(x, y) {
            grid.velocity_x_mut()[i] += vx;
            grid.velocity_y_mut()[i] += vy;
        }
    }
}

impl Default for ForceInjector {
    fn default() -> Self {
        Self {
            amount: Self::DEFAULT_AMOUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_amount_is_one() {
        assert_eq!(ForceInjector::default().amount(), 1.0);
    }

    #[test]
    fn new_rejects_negative_amount() {
        assert!(ForceInjector::new(-1.0).is_err());
    }

    #[test]
    fn new_rejects_nan_amount() {
        assert!(ForceInjector::new(f32::NAN).is_err());
    }

    #[test]
    fn new_accepts_zero_amount() {
        assert_eq!(ForceInjector::new(0.0).unwrap().amount(), 0.0);
    }

    #[test]
    fn in_bounds_injection_adds_exactly_amount() {
        let injector = ForceInjector::new(2.5).unwrap();
        let mut grid = FieldGrid::zeroed(5).unwrap();
        injector.inject(&mut grid, 3, 1);

        let target = grid.index(3, 1).unwrap();
        for (i, &d) in grid.density().iter().enumerate() {
            if i == target {
                assert_eq!(d, 2.5);
            } else {
                assert_eq!(d, 0.0);
            }
        }
    }

    #[test]
    fn injection_accumulates() {
        let injector = ForceInjector::default();
        let mut grid = FieldGrid::zeroed(4).unwrap();
        injector.inject(&mut grid, 2, 2);
        injector.inject(&mut grid, 2, 2);
        assert_eq!(grid.density()[grid.index(2, 2).unwrap()], 2.0);
    }

    #[test]
    fn out_of_range_injection_is_a_silent_noop() {
        let injector = ForceInjector::default();
        let mut grid = FieldGrid::new(4, 13).unwrap();
        let before = grid.density().to_vec();

        injector.inject(&mut grid, -1, 0);
        injector.inject(&mut grid, 0, -1);
        injector.inject(&mut grid, 4, 0);
        injector.inject(&mut grid, 0, 4);
        injector.inject(&mut grid, i32::MAX, i32::MIN);

        assert_eq!(grid.density(), &before[..], "field must be bit-identical");
    }

    #[test]
    fn no_upper_bound_on_density() {
        let injector = ForceInjector::new(1e6).unwrap();
        let mut grid = FieldGrid::zeroed(2).unwrap();
        injector.inject(&mut grid, 0, 0);
        injector.inject(&mut grid, 0, 0);
        assert_eq!(grid.density()[0], 2e6);
    }

    #[test]
    fn velocity_injection_hits_both_fields() {
        let injector = ForceInjector::default();
        let mut grid = FieldGrid::zeroed(4).unwrap();
        injector.inject_velocity(&mut grid, 1, 1, 0.5, -0.25);

        let i = grid.index(1, 1).unwrap();
        assert_eq!(grid.velocity_x()[i], 0.5);
        assert_eq!(grid.velocity_y()[i], -0.25);
        // Density is untouched by velocity injection.
        assert!(grid.density().iter().all(|&d| d == 0.0));
    }

    #[test]
    fn velocity_injection_out_of_range_is_a_noop() {
        let injector = ForceInjector::default();
        let mut grid = FieldGrid::zeroed(4).unwrap();
        injector.inject_velocity(&mut grid, 4, 4, 1.0, 1.0);
        assert!(grid.velocity_x().iter().all(|&v| v == 0.0));
        assert!(grid.velocity_y().iter().all(|&v| v == 0.0));
    }
}
