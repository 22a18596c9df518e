//! The [`FieldGrid`]: density and reserved velocity storage for one
//! grid incarnation.

use eddy_core::{ConfigError, GridGenerationId, TickId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::snapshot::DensitySnapshot;

/// A square 2D grid holding the scalar density field and two reserved
/// velocity fields.
///
/// All three fields are flat row-major `f32` buffers of identical
/// length `size * size`; cell `(x, y)` lives at index `x * size + y`.
/// The velocity fields exist so a future advection operator has
/// somewhere to live — nothing in the current update rule reads them,
/// but they are resized in lockstep with density.
///
/// A grid is replaced wholesale on resize, never migrated; the
/// [`generation`](FieldGrid::generation) counter identifies each
/// incarnation.
///
/// # Examples
///
/// ```
/// use eddy_field::FieldGrid;
///
/// let grid = FieldGrid::new(16, 42).unwrap();
/// assert_eq!(grid.size(), 16);
/// assert_eq!(grid.cell_count(), 256);
/// assert!(grid.density().iter().all(|&d| (0.0..1.0).contains(&d)));
/// assert!(grid.velocity_x().iter().all(|&v| v == 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct FieldGrid {
    size: u32,
    generation: GridGenerationId,
    density: Vec<f32>,
    velocity_x: Vec<f32>,
    velocity_y: Vec<f32>,
}

impl FieldGrid {
    /// Maximum edge length: the flat cell index `x * size + y` must fit
    /// in `i32` so coordinate arithmetic cannot overflow.
    pub const MAX_EDGE: u32 = 46_340;

    fn validate_size(size: u32) -> Result<(), ConfigError> {
        if size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if size > Self::MAX_EDGE {
            return Err(ConfigError::GridTooLarge {
                size,
                max: Self::MAX_EDGE,
            });
        }
        Ok(())
    }

    /// Create a grid with density drawn uniformly from `[0, 1)` and
    /// zeroed velocity fields.
    ///
    /// The density stream comes from `ChaCha8Rng::seed_from_u64(seed)`,
    /// so the same `(size, seed)` pair always yields the same field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyGrid`] for `size == 0` and
    /// [`ConfigError::GridTooLarge`] above [`MAX_EDGE`](Self::MAX_EDGE).
    pub fn new(size: u32, seed: u64) -> Result<Self, ConfigError> {
        Self::validate_size(size)?;
        let n = (size as usize) * (size as usize);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let density = (0..n).map(|_| rng.random::<f32>()).collect();
        Ok(Self {
            size,
            generation: GridGenerationId(0),
            density,
            velocity_x: vec![0.0; n],
            velocity_y: vec![0.0; n],
        })
    }

    /// Create a grid with all three fields zeroed.
    ///
    /// Deterministic setups (and the end-to-end injection example in the
    /// engine tests) start from a zero density field instead of a
    /// randomized one.
    ///
    /// # Errors
    ///
    /// Same validation as [`new`](Self::new).
    pub fn zeroed(size: u32) -> Result<Self, ConfigError> {
        Self::validate_size(size)?;
        let n = (size as usize) * (size as usize);
        Ok(Self {
            size,
            generation: GridGenerationId(0),
            density: vec![0.0; n],
            velocity_x: vec![0.0; n],
            velocity_y: vec![0.0; n],
        })
    }

    /// Discard current contents and reinitialize at `new_size` as in
    /// [`new`](Self::new), bumping the generation counter.
    ///
    /// The caller supplies a fresh `seed`; a resize never continues the
    /// prior incarnation's random stream. Validation happens before any
    /// mutation: on error the grid is untouched and remains usable.
    ///
    /// # Errors
    ///
    /// Same validation as [`new`](Self::new).
    pub fn resize(&mut self, new_size: u32, seed: u64) -> Result<(), ConfigError> {
        let fresh = Self::new(new_size, seed)?;
        self.size = fresh.size;
        self.density = fresh.density;
        self.velocity_x = fresh.velocity_x;
        self.velocity_y = fresh.velocity_y;
        self.generation = self.generation.next();
        Ok(())
    }

    /// Grid edge length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Total number of cells (`size * size`).
    pub fn cell_count(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    /// Generation of this grid incarnation (0 at creation, bumped on
    /// every resize).
    pub fn generation(&self) -> GridGenerationId {
        self.generation
    }

    /// Bounds-checked row-major index for cell `(x, y)`.
    ///
    /// Returns `None` when either coordinate falls outside
    /// `[0, size)`. This is the single bounds authority for injection:
    /// callers that want the silently-ignore-out-of-range policy simply
    /// skip the write on `None`.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        let n = self.size as i32;
        if x < 0 || x >= n || y < 0 || y >= n {
            return None;
        }
        Some((x as usize) * (self.size as usize) + (y as usize))
    }

    /// The density field as a flat row-major slice.
    pub fn density(&self) -> &[f32] {
        &self.density
    }

    /// Mutable access to the density field for operators.
    pub fn density_mut(&mut self) -> &mut [f32] {
        &mut self.density
    }

    /// The reserved x-velocity field.
    pub fn velocity_x(&self) -> &[f32] {
        &self.velocity_x
    }

    /// Mutable access to the reserved x-velocity field.
    pub fn velocity_x_mut(&mut self) -> &mut [f32] {
        &mut self.velocity_x
    }

    /// The reserved y-velocity field.
    pub fn velocity_y(&self) -> &[f32] {
        &self.velocity_y
    }

    /// Mutable access to the reserved y-velocity field.
    pub fn velocity_y_mut(&mut self) -> &mut [f32] {
        &mut self.velocity_y
    }

    /// Take an immutable full copy of the density field.
    ///
    /// Copy semantics prevent torn reads: the snapshot an observer holds
    /// never changes, no matter what later ticks do to the grid.
    pub fn snapshot(&self, tick: TickId) -> DensitySnapshot {
        DensitySnapshot::new(tick, self.generation, self.size, self.density.clone())
    }
}
