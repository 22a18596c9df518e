//! The request-driven simulation controller.
//!
//! [`SimulationController`] owns the single shared [`FieldGrid`] and
//! serializes every mutating request behind one mutex: the whole
//! "optionally resize/inject → tick → snapshot" sequence executes as
//! one atomic unit relative to other requests. There is no timer — the
//! simulation advances exactly once per handled request.
//!
//! # Ownership model
//!
//! The controller is `Send + Sync`; independent callers share it via
//! `Arc` and call [`handle()`](SimulationController::handle)
//! concurrently. Injection and stepping are O(size²) bounded
//! computations with no I/O, so holding the lock across a request
//! cannot stall other callers indefinitely. A poisoned lock (a panic
//! in a prior request) fails the current request fast with
//! [`RequestError::StatePoisoned`] rather than handing out a possibly
//! half-updated snapshot.

use std::sync::{Arc, Mutex};

use eddy_core::{ConfigError, Request, RequestError, TickId};
use eddy_field::{DensitySnapshot, FieldGrid};
use eddy_ops::{ForceInjector, Operator, StochasticDecay};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SimulationConfig;
use crate::egress::{ObserverHub, SimulationUpdate};

// Compile-time assertion: the controller must be shareable across
// caller threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send_sync::<SimulationController>();
    }
};

// ── SimState ────────────────────────────────────────────────────

/// Everything a request mutates, guarded by one lock.
struct SimState {
    grid: FieldGrid,
    pipeline: Vec<Box<dyn Operator>>,
    injector: ForceInjector,
    tick: TickId,
    /// Draws a fresh grid seed for every create/resize, so a reset
    /// never continues the prior incarnation's random stream.
    seed_rng: ChaCha8Rng,
}

impl SimState {
    /// Run the operator pipeline for the next tick and snapshot the
    /// result. The tick counter only advances when every operator
    /// succeeds.
    fn advance(&mut self) -> Result<DensitySnapshot, RequestError> {
        let next = self.tick.next();
        for op in &self.pipeline {
            op.apply(&mut self.grid, next)
                .map_err(|reason| RequestError::Operator {
                    name: op.name().to_string(),
                    reason,
                })?;
        }
        self.tick = next;
        Ok(self.grid.snapshot(next))
    }
}

// ── SimulationController ────────────────────────────────────────

/// Orchestrates resize/reset, force injection, and tick advancement
/// against a single shared grid.
///
/// # Example
///
/// ```
/// use eddy_core::Request;
/// use eddy_engine::{SimulationConfig, SimulationController};
///
/// let controller = SimulationController::new(SimulationConfig {
///     default_grid_size: 8,
///     ..Default::default()
/// })
/// .unwrap();
///
/// let snap = controller
///     .handle(Request::StartSimulation { grid_size: Some(4) })
///     .unwrap();
/// assert_eq!(snap.size(), 4);
///
/// let snap = controller.handle(Request::AddForce { x: 1, y: 2 }).unwrap();
/// assert_eq!(snap.size(), 4);
/// ```
pub struct SimulationController {
    state: Mutex<SimState>,
    hub: ObserverHub,
    default_grid_size: u32,
}

impl SimulationController {
    /// Create a controller with a freshly randomized grid of the
    /// configured default size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation
    /// or the default update operator cannot be built.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut seed_rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid_seed: u64 = seed_rng.random();
        let grid = FieldGrid::new(config.default_grid_size, grid_seed)?;
        Self::assemble(config, grid, seed_rng)
    }

    /// Create a controller around an explicit initial grid.
    ///
    /// Deterministic setups start from a known field (usually
    /// [`FieldGrid::zeroed`]) instead of the randomized default. The
    /// grid's size becomes the current size; the configured default
    /// still applies to later `StartSimulation` requests that omit one.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn from_grid(config: SimulationConfig, grid: FieldGrid) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut seed_rng = ChaCha8Rng::seed_from_u64(config.seed);
        // Keep the stream position identical to `new()`: the grid seed
        // is drawn and discarded so both constructors produce the same
        // forcing sequence for the same master seed.
        let _: u64 = seed_rng.random();
        Self::assemble(config, grid, seed_rng)
    }

    fn assemble(
        config: SimulationConfig,
        grid: FieldGrid,
        mut seed_rng: ChaCha8Rng,
    ) -> Result<Self, ConfigError> {
        let decay = StochasticDecay::builder()
            .seed_offset(seed_rng.random())
            .build()
            .map_err(|reason| ConfigError::InvalidOperator { reason })?;
        let state = SimState {
            grid,
            pipeline: vec![Box::new(decay)],
            injector: ForceInjector::default(),
            tick: TickId(0),
            seed_rng,
        };
        Ok(Self {
            state: Mutex::new(state),
            hub: ObserverHub::new(config.observer_queue_capacity),
            default_grid_size: config.default_grid_size,
        })
    }

    /// Handle one external request: optionally resize or inject, run
    /// one tick, snapshot, and broadcast the snapshot to observers.
    ///
    /// The whole sequence holds the state lock, so concurrent requests
    /// serialize and each observes a fully up-to-date grid. The
    /// returned snapshot is the same allocation observers receive.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Config`] — `StartSimulation` carried an
    ///   invalid grid size; the prior grid remains valid and usable.
    /// - [`RequestError::Operator`] — an operator failed while
    ///   advancing the tick.
    /// - [`RequestError::StatePoisoned`] — a prior request panicked
    ///   while holding the lock; fatal to this request.
    ///
    /// An out-of-range `AddForce` is **not** an error: the injection
    /// is silently skipped and the tick still runs.
    pub fn handle(&self, request: Request) -> Result<Arc<DensitySnapshot>, RequestError> {
        let snapshot = {
            let mut guard = self.state.lock().map_err(|_| RequestError::StatePoisoned)?;
            let state = &mut *guard;
            match request {
                Request::StartSimulation { grid_size } => {
                    let size = grid_size.unwrap_or(self.default_grid_size);
                    let seed: u64 = state.seed_rng.random();
                    state.grid.resize(size, seed)?;
                }
                Request::AddForce { x, y } => {
                    state.injector.inject(&mut state.grid, x, y);
                }
            }
            state.advance()?
        };

        let snapshot = Arc::new(snapshot);
        self.hub.broadcast(&snapshot);
        Ok(snapshot)
    }

    /// Register an observer; every subsequent update is pushed to the
    /// returned receiver as a [`SimulationUpdate`].
    pub fn subscribe(&self) -> crossbeam_channel::Receiver<SimulationUpdate> {
        self.hub.subscribe()
    }

    /// Number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        self.hub.observer_count()
    }

    /// The tick of the most recent update (0 before any request).
    ///
    /// # Errors
    ///
    /// [`RequestError::StatePoisoned`] if a prior request panicked.
    pub fn current_tick(&self) -> Result<TickId, RequestError> {
        let guard = self.state.lock().map_err(|_| RequestError::StatePoisoned)?;
        Ok(guard.tick)
    }

    /// The current grid edge length.
    ///
    /// # Errors
    ///
    /// [`RequestError::StatePoisoned`] if a prior request panicked.
    pub fn grid_size(&self) -> Result<u32, RequestError> {
        let guard = self.state.lock().map_err(|_| RequestError::StatePoisoned)?;
        Ok(guard.grid.size())
    }

    /// Take a read-only snapshot of the current field without
    /// advancing the simulation.
    ///
    /// # Errors
    ///
    /// [`RequestError::StatePoisoned`] if a prior request panicked.
    pub fn snapshot(&self) -> Result<DensitySnapshot, RequestError> {
        let guard = self.state.lock().map_err(|_| RequestError::StatePoisoned)?;
        Ok(guard.grid.snapshot(guard.tick))
    }
}

impl std::fmt::Debug for SimulationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("SimulationController");
        s.field("default_grid_size", &self.default_grid_size);
        s.field("observers", &self.hub.observer_count());
        match self.state.lock() {
            Ok(guard) => {
                s.field("current_tick", &guard.tick);
                s.field("grid_size", &guard.grid.size());
            }
            Err(_) => {
                s.field("state", &"<poisoned>");
            }
        }
        s.finish()
    }
}
