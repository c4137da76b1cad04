use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounds the number of in-flight attempts. `acquire` suspends until a slot
/// frees up; the returned [`Admission`] releases the slot on drop, so every
/// exit path of an attempt (completion, timeout, panic) gives the permit
/// back.
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    gauge: Arc<InFlightGauge>,
}

#[derive(Debug, Default)]
pub struct InFlightGauge {
    current: AtomicUsize,
    high_water: AtomicUsize,
}

impl InFlightGauge {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }
}

/// One admitted attempt. Dropping it releases the concurrency slot.
#[derive(Debug)]
pub struct Admission {
    _permit: OwnedSemaphorePermit,
    gauge: Arc<InFlightGauge>,
}

impl Drop for Admission {
    fn drop(&mut self) {
        self.gauge.exit();
    }
}

impl ConcurrencyLimiter {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(cap)),
            gauge: Arc::new(InFlightGauge::default()),
        }
    }

    /// Wait until fewer than the cap are in flight, then admit one attempt.
    /// Returns `None` only if the semaphore is closed, which the limiter
    /// itself never does.
    pub async fn acquire(&self) -> Option<Admission> {
        let permit = self.semaphore.clone().acquire_owned().await.ok()?;
        self.gauge.enter();
        Some(Admission {
            _permit: permit,
            gauge: self.gauge.clone(),
        })
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.gauge.current()
    }

    /// Highest concurrent admission count observed so far.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.gauge.high_water()
    }
}
