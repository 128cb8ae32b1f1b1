//! Admission gate bounding the number of in-flight fetches
//!
//! The gate is a counting semaphore. Every acquired slot is represented by a
//! [`GatePermit`]; dropping the permit returns the slot, so a worker releases
//! its slot on every exit path, including early error returns.

use crate::SearchError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Default ceiling on simultaneous HTTP requests
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 20;

#[derive(Debug, Default)]
struct GateCounters {
    in_flight: AtomicUsize,
    high_water: AtomicUsize,
}

/// Counting semaphore shared by all workers of a search
///
/// Cloning the gate is cheap and yields a handle to the same slots.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    counters: Arc<GateCounters>,
    capacity: usize,
}

/// A held slot of an [`AdmissionGate`]
///
/// The slot is returned when the permit is dropped.
#[derive(Debug)]
pub struct GatePermit {
    counters: Arc<GateCounters>,
    // Dropped after `Drop::drop` runs, so the counter never exceeds capacity
    _permit: OwnedSemaphorePermit,
}

impl AdmissionGate {
    /// Creates a gate admitting at most `capacity` holders at once
    ///
    /// A capacity of zero is raised to one; a gate that never admits anyone
    /// would deadlock every worker.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            counters: Arc::new(GateCounters::default()),
            capacity,
        }
    }

    /// Waits for a free slot
    ///
    /// Waiters are served in FIFO order. There is no timeout; the wait lasts
    /// until another holder drops its permit.
    ///
    /// # Returns
    ///
    /// * `Ok(GatePermit)` - A held slot
    /// * `Err(SearchError::GateClosed)` - The gate was closed
    pub async fn acquire(&self) -> Result<GatePermit, SearchError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| SearchError::GateClosed)?;

        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.high_water.fetch_max(now, Ordering::SeqCst);

        Ok(GatePermit {
            counters: Arc::clone(&self.counters),
            _permit: permit,
        })
    }

    /// Closes the gate; pending and future acquires fail
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of permits currently held
    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of permits held at the same time since construction
    pub fn high_water_mark(&self) -> usize {
        self.counters.high_water.load(Ordering::SeqCst)
    }

    /// Number of slots free right now
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Default for AdmissionGate {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT_REQUESTS)
    }
}

impl GatePermit {
    /// Returns the slot to the gate
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
