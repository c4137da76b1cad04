use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Arrival-rate pacer on a virtual fixed schedule: slot k opens at
/// `start + k / rate`, independent of how long individual attempts take.
/// Sleeping between launches would couple the rate to attempt latency;
/// the fixed schedule keeps the intended rate even when the target slows
/// down and the concurrency limiter is the only brake.
#[derive(Debug)]
pub struct Pacer {
    start: Instant,
    rate: f64,
    launched: AtomicU64,
}

impl Pacer {
    /// `rate` must be positive and finite (enforced by config validation).
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self {
            start: Instant::now(),
            rate,
            launched: AtomicU64::new(0),
        }
    }

    /// Reserve the next slot and wait until it opens. Returns immediately
    /// when the slot is already in the past; never returns early. The slot
    /// reservation is atomic, so concurrent callers cannot compute the same
    /// slot.
    pub async fn next_slot(&self) -> Instant {
        let slot_index = self.launched.fetch_add(1, Ordering::Relaxed);
        let offset = Duration::from_secs_f64(slot_index as f64 / self.rate);
        let slot = self.start + offset;
        sleep_until(slot).await;
        slot
    }

    /// Slots reserved so far.
    #[must_use]
    pub fn launched(&self) -> u64 {
        self.launched.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slots_open_on_the_virtual_schedule() {
        let pacer = Pacer::new(10.0);
        let start = pacer.started_at();

        for expected_index in 0u64..5 {
            let slot = pacer.next_slot().await;
            let expected_offset = Duration::from_millis(expected_index * 100);
            assert_eq!(slot - start, expected_offset);
            assert!(Instant::now() >= slot, "slot must never open early");
        }
        assert_eq!(pacer.launched(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn late_callers_are_not_delayed() {
        let pacer = Pacer::new(100.0);
        // Burn half a second without reserving slots; the next ten slots are
        // all in the past and must open without sleeping.
        tokio::time::sleep(Duration::from_millis(500)).await;

        let before = Instant::now();
        for _ in 0..10 {
            let _ = pacer.next_slot().await;
        }
        assert_eq!(Instant::now(), before);
    }
}
