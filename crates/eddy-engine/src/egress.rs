//! Observer subscription and snapshot broadcast.
//!
//! Every handled request produces one [`SimulationUpdate`] pushed to
//! all subscribed observers. Delivery is best-effort per observer:
//! updates are snapshots of the full grid, so a slow observer that
//! misses one simply sees a complete, newer field on its next receive.
//! The tick path never blocks on an observer.

use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use eddy_field::DensitySnapshot;

/// The event pushed to observers after every update.
///
/// Carries a single field: the full density matrix as an immutable
/// snapshot. No partial or delta updates exist.
#[derive(Clone, Debug)]
pub struct SimulationUpdate {
    /// The post-tick density field.
    pub density: Arc<DensitySnapshot>,
}

/// Fan-out hub for [`SimulationUpdate`] delivery.
///
/// Observers subscribe for a bounded receiver; broadcast uses
/// `try_send` so a full queue drops that observer's update and a
/// disconnected receiver is pruned from the list.
pub struct ObserverHub {
    queue_capacity: usize,
    senders: Mutex<Vec<Sender<SimulationUpdate>>>,
}

impl ObserverHub {
    /// Create a hub whose per-observer queues hold `queue_capacity`
    /// undelivered updates.
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            queue_capacity,
            senders: Mutex::new(Vec::new()),
        }
    }

    /// Register a new observer and return its receiving end.
    pub fn subscribe(&self) -> Receiver<SimulationUpdate> {
        let (tx, rx) = crossbeam_channel::bounded(self.queue_capacity);
        self.lock_senders().push(tx);
        rx
    }

    /// Number of currently registered observers.
    ///
    /// Counts receivers that have not yet been pruned; pruning happens
    /// on the first broadcast after a disconnect.
    pub fn observer_count(&self) -> usize {
        self.lock_senders().len()
    }

    /// Push one update to every observer.
    ///
    /// Never blocks: a full observer queue drops this update for that
    /// observer; a disconnected observer is removed.
    pub fn broadcast(&self, snapshot: &Arc<DensitySnapshot>) {
        self.lock_senders().retain(|tx| {
            match tx.try_send(SimulationUpdate {
                density: Arc::clone(snapshot),
            }) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => false,
            }
        });
    }

    /// The sender list holds no cross-field invariants, so a panic
    /// while appending or pruning cannot leave it logically torn;
    /// recover the guard instead of propagating the poison.
    fn lock_senders(&self) -> std::sync::MutexGuard<'_, Vec<Sender<SimulationUpdate>>> {
        self.senders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ObserverHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverHub")
            .field("queue_capacity", &self.queue_capacity)
            .field("observers", &self.observer_count())
            .finish()
    }
}
