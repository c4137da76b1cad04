use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::histogram::LatencyHistogram;
use super::types::{AttemptRecord, CampaignSummary, OutcomeCounts, ProgressSnapshot};
use crate::error::MetricsError;

/// Collects one record per completed attempt. Appends happen in completion
/// order under a mutex; `finalize` restores launch order and freezes the
/// aggregator, after which further records are rejected.
#[derive(Debug)]
pub struct ResultAggregator {
    inner: Mutex<AggregatorInner>,
}

#[derive(Debug)]
struct AggregatorInner {
    records: Vec<AttemptRecord>,
    counts: OutcomeCounts,
    histogram: LatencyHistogram,
    latency_sum_ms: u128,
    min_latency_ms: u64,
    max_latency_ms: u64,
    finalized: bool,
}

impl ResultAggregator {
    /// # Errors
    ///
    /// Returns an error if the latency histogram cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        Ok(Self {
            inner: Mutex::new(AggregatorInner {
                records: Vec::new(),
                counts: OutcomeCounts::default(),
                histogram: LatencyHistogram::new()?,
                latency_sum_ms: 0,
                min_latency_ms: u64::MAX,
                max_latency_ms: 0,
                finalized: false,
            }),
        })
    }

    /// Append one completed attempt.
    ///
    /// # Errors
    ///
    /// Returns `RecordAfterFinalize` once the aggregator has been finalized,
    /// or a histogram error if the latency cannot be recorded.
    pub fn record(&self, record: AttemptRecord) -> Result<(), MetricsError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.finalized {
            return Err(MetricsError::RecordAfterFinalize);
        }
        inner.histogram.record(record.latency_ms)?;
        inner.counts.bump(record.outcome);
        inner.latency_sum_ms = inner.latency_sum_ms.saturating_add(record.latency_ms.into());
        inner.min_latency_ms = inner.min_latency_ms.min(record.latency_ms);
        inner.max_latency_ms = inner.max_latency_ms.max(record.latency_ms);
        inner.records.push(record);
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        ProgressSnapshot {
            completed: inner.counts.total(),
            counts: inner.counts,
        }
    }

    /// Freeze the aggregator and produce the index-ordered records plus the
    /// derived summary. `wall` is the campaign wall-clock duration and
    /// `peak_in_flight` the concurrency high-water mark.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFinalized` on a second call.
    pub fn finalize(
        &self,
        wall: Duration,
        peak_in_flight: u64,
    ) -> Result<(Vec<AttemptRecord>, CampaignSummary), MetricsError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.finalized {
            return Err(MetricsError::AlreadyFinalized);
        }
        inner.finalized = true;

        let mut records = std::mem::take(&mut inner.records);
        records.sort_unstable_by_key(|record| record.index);

        let total = inner.counts.total();
        let duration_ms = u64::try_from(wall.as_millis()).unwrap_or(u64::MAX);
        let avg_latency_ms = if total > 0 {
            let avg = inner
                .latency_sum_ms
                .checked_div(u128::from(total))
                .unwrap_or(0);
            u64::try_from(avg).unwrap_or(u64::MAX)
        } else {
            0
        };
        let min_latency_ms = if total > 0 { inner.min_latency_ms } else { 0 };
        let (p50_latency_ms, p90_latency_ms, p99_latency_ms) = inner.histogram.percentiles();
        let achieved_rate_x100 = {
            let scaled = u128::from(total)
                .saturating_mul(100_000)
                .checked_div(u128::from(duration_ms.max(1)))
                .unwrap_or(0);
            u64::try_from(scaled).unwrap_or(u64::MAX)
        };

        let summary = CampaignSummary {
            duration_ms,
            counts: inner.counts,
            min_latency_ms,
            max_latency_ms: inner.max_latency_ms,
            avg_latency_ms,
            p50_latency_ms,
            p90_latency_ms,
            p99_latency_ms,
            achieved_rate_x100,
            peak_in_flight,
        };

        Ok((records, summary))
    }
}
