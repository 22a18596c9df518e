//! The decaying stochastic-forcing update operator.
//!
//! Each tick, every cell is updated as
//! `density' = density * retention + u * forcing` with `u` drawn
//! uniformly from `[0, 1)` per cell. This is a decaying low-pass filter
//! with stochastic forcing, not diffusion: there is no neighbor
//! coupling, and the operator must stay strictly cell-independent.
//!
//! Respects the determinism contract: the RNG is a ChaCha8 stream
//! seeded from `seed_offset XOR tick`, so the same configuration at the
//! same tick reproduces the same field bit for bit.
//!
//! Constructed via the builder pattern: [`StochasticDecay::builder`].

use eddy_core::{OperatorError, TickId};
use eddy_field::FieldGrid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::operator::Operator;

/// The per-tick decay + stochastic forcing operator.
///
/// With the default coefficients this is
/// `density' = density * 0.99 + u * 0.01`, which pulls any starting
/// field into the stationary `[0, 1)` range after enough ticks while
/// keeping it there once arrived.
#[derive(Clone, Debug)]
pub struct StochasticDecay {
    retention: f32,
    forcing: f32,
    seed_offset: u64,
}

/// Builder for [`StochasticDecay`].
///
/// All fields have defaults; `build()` validates the coefficients.
pub struct StochasticDecayBuilder {
    retention: f32,
    forcing: f32,
    seed_offset: u64,
}

impl StochasticDecay {
    /// Default retention factor applied to the previous density.
    pub const DEFAULT_RETENTION: f32 = 0.99;
    /// Default gain on the per-cell uniform forcing term.
    pub const DEFAULT_FORCING: f32 = 0.01;

    /// Create a new builder with the default coefficients.
    pub fn builder() -> StochasticDecayBuilder {
        StochasticDecayBuilder {
            retention: Self::DEFAULT_RETENTION,
            forcing: Self::DEFAULT_FORCING,
            seed_offset: 0,
        }
    }

    /// The retention factor.
    pub fn retention(&self) -> f32 {
        self.retention
    }

    /// The forcing gain.
    pub fn forcing(&self) -> f32 {
        self.forcing
    }
}

impl StochasticDecayBuilder {
    /// Set the retention factor (default 0.99). Must be in `[0, 1]`.
    pub fn retention(mut self, retention: f32) -> Self {
        self.retention = retention;
        self
    }

    /// Set the forcing gain (default 0.01). Must be finite and `>= 0`.
    pub fn forcing(mut self, forcing: f32) -> Self {
        self.forcing = forcing;
        self
    }

    /// Set the seed offset for the deterministic RNG (default 0).
    pub fn seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    /// Build the operator, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `retention` is outside `[0, 1]` or NaN, or if
    /// `forcing` is negative or not finite.
    pub fn build(self) -> Result<StochasticDecay, String> {
        if !self.retention.is_finite() || !(0.0..=1.0).contains(&self.retention) {
            return Err(format!(
                "retention must be in [0, 1], got {}",
                self.retention
            ));
        }
        if !self.forcing.is_finite() || self.forcing < 0.0 {
            return Err(format!(
                "forcing must be finite and >= 0, got {}",
                self.forcing
            ));
        }
        Ok(StochasticDecay {
            retention: self.retention,
            forcing: self.forcing,
            seed_offset: self.seed_offset,
        })
    }
}

impl Operator for StochasticDecay {
    fn name(&self) -> &str {
        "stochastic_decay"
    }

    fn apply(&self, grid: &mut FieldGrid, tick: TickId) -> Result<(), OperatorError> {
        // Deterministic RNG seeded from seed_offset XOR tick. One draw
        // per cell, consumed in row-major order.
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed_offset ^ tick.0);
        for d in grid.density_mut() {
            *d = *d * self.retention + rng.random::<f32>() * self.forcing;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn default_op() -> StochasticDecay {
        StochasticDecay::builder().build().unwrap()
    }

    // ── Builder tests ───────────────────────────────────────────

    #[test]
    fn builder_defaults() {
        let op = default_op();
        assert_eq!(op.name(), "stochastic_decay");
        assert_eq!(op.retention(), StochasticDecay::DEFAULT_RETENTION);
        assert_eq!(op.forcing(), StochasticDecay::DEFAULT_FORCING);
    }

    #[test]
    fn builder_rejects_retention_above_one() {
        let result = StochasticDecay::builder().retention(1.5).build();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("retention"));
    }

    #[test]
    fn builder_rejects_negative_retention() {
        assert!(StochasticDecay::builder().retention(-0.1).build().is_err());
    }

    #[test]
    fn builder_rejects_nan_forcing() {
        let result = StochasticDecay::builder().forcing(f32::NAN).build();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("forcing"));
    }

    #[test]
    fn builder_rejects_negative_forcing() {
        assert!(StochasticDecay::builder().forcing(-0.01).build().is_err());
    }

    // ── Step logic tests ────────────────────────────────────────

    #[test]
    fn per_cell_bounds_hold() {
        let op = default_op();
        let mut grid = FieldGrid::new(12, 77).unwrap();
        let before = grid.density().to_vec();
        op.apply(&mut grid, TickId(1)).unwrap();

        for (prev, next) in before.iter().zip(grid.density()) {
            let lo = prev * 0.99;
            let hi = prev * 0.99 + 0.01;
            assert!(
                (lo..=hi).contains(next),
                "cell left the decay band: {prev} -> {next}"
            );
        }
    }

    #[test]
    fn same_tick_same_output() {
        let op = default_op();
        let mut a = FieldGrid::new(8, 5).unwrap();
        let mut b = FieldGrid::new(8, 5).unwrap();
        op.apply(&mut a, TickId(3)).unwrap();
        op.apply(&mut b, TickId(3)).unwrap();
        assert_eq!(a.density(), b.density(), "same tick -> bit-identical field");
    }

    #[test]
    fn consecutive_ticks_are_not_idempotent() {
        let op = default_op();
        let mut a = FieldGrid::zeroed(8).unwrap();
        let mut b = FieldGrid::zeroed(8).unwrap();
        op.apply(&mut a, TickId(1)).unwrap();
        op.apply(&mut b, TickId(2)).unwrap();
        assert_ne!(
            a.density(),
            b.density(),
            "different ticks should draw different forcing"
        );
    }

    #[test]
    fn no_spatial_coupling() {
        // Two grids differing in exactly one cell must agree everywhere
        // else after a step; any neighbor coupling would smear the
        // difference outward.
        let op = default_op();
        let mut a = FieldGrid::zeroed(8).unwrap();
        let mut b = FieldGrid::zeroed(8).unwrap();
        let center = a.index(4, 4).unwrap();
        b.density_mut()[center] = 100.0;

        op.apply(&mut a, TickId(9)).unwrap();
        op.apply(&mut b, TickId(9)).unwrap();

        for (i, (da, db)) in a.density().iter().zip(b.density()).enumerate() {
            if i == center {
                assert_ne!(da, db);
            } else {
                assert_eq!(da, db, "cell {i} was coupled to the perturbed cell");
            }
        }
    }

    #[test]
    fn repeated_steps_converge_to_stationary_range() {
        let op = default_op();
        let mut grid = FieldGrid::zeroed(6).unwrap();
        grid.density_mut().fill(100.0);

        for t in 1..=1500u64 {
            op.apply(&mut grid, TickId(t)).unwrap();
        }

        // 100 * 0.99^1500 is far below 1e-4; what remains is the
        // stationary forcing sum, bounded by 0.01 / (1 - 0.99) = 1.
        for &d in grid.density() {
            assert!((0.0..1.01).contains(&d), "density {d} escaped [0, ~1)");
        }
    }

    #[test]
    fn zero_forcing_is_pure_decay() {
        let op = StochasticDecay::builder().forcing(0.0).build().unwrap();
        let mut grid = FieldGrid::zeroed(4).unwrap();
        grid.density_mut().fill(2.0);
        op.apply(&mut grid, TickId(1)).unwrap();
        for &d in grid.density() {
            assert!((d - 1.98).abs() < 1e-6);
        }
    }

    #[test]
    fn velocity_fields_are_untouched() {
        let op = default_op();
        let mut grid = FieldGrid::new(8, 21).unwrap();
        grid.velocity_x_mut()[3] = 1.5;
        op.apply(&mut grid, TickId(1)).unwrap();
        assert_eq!(grid.velocity_x()[3], 1.5);
        assert!(grid.velocity_y().iter().all(|&v| v == 0.0));
    }

    proptest! {
        #[test]
        fn bounds_hold_for_arbitrary_density(
            value in 0.0f32..1000.0,
            tick in 1u64..10_000,
            offset in any::<u64>(),
        ) {
            let op = StochasticDecay::builder()
                .seed_offset(offset)
                .build()
                .unwrap();
            let mut grid = FieldGrid::zeroed(4).unwrap();
            grid.density_mut().fill(value);
            op.apply(&mut grid, TickId(tick)).unwrap();

            for &d in grid.density() {
                prop_assert!(d >= value * 0.99);
                prop_assert!(d <= value * 0.99 + 0.01 + f32::EPSILON * value.max(1.0));
            }
        }
    }
}
