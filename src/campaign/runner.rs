use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::config::CampaignConfig;
use super::limiter::ConcurrencyLimiter;
use super::pacer::Pacer;
use crate::error::{AppError, AppResult, CampaignError};
use crate::metrics::{AttemptRecord, CampaignStatus, Outcome, ProgressSnapshot, ResultAggregator};
use crate::report::{ConfigSnapshot, ResultSet};
use crate::shutdown::ShutdownSender;
use crate::ssh::{Connector, Probe};

/// Buffered completions between attempt tasks and the collector.
const RECORD_CHANNEL_CAPACITY: usize = 1024;
/// How often the collector logs campaign progress.
const PROGRESS_INTERVAL: Duration = Duration::from_secs(2);

/// Drive one campaign to completion: exactly `config.count` launches on the
/// pacer's schedule, bounded by the concurrency limiter, each executed as an
/// independent task whose completion streams into the aggregator.
///
/// Per-attempt failures are recorded outcomes, never errors. A shutdown
/// signal stops new launches; in-flight attempts drain to completion and the
/// partial result set is finalized with status `Cancelled`.
///
/// # Errors
///
/// Returns an error only for campaign-fatal conditions: invalid
/// configuration, a target that does not resolve before the first attempt,
/// or engine-internal task failures.
pub async fn run_campaign(
    config: CampaignConfig,
    connector: Arc<dyn Connector>,
    shutdown_tx: &ShutdownSender,
) -> AppResult<ResultSet> {
    config.validate().map_err(AppError::config)?;
    resolve_target(&config).await?;

    info!(
        "Starting campaign against {}: {} attempts at {}/s, concurrency {}",
        config.endpoint, config.count, config.rate, config.concurrency
    );

    let aggregator = Arc::new(ResultAggregator::new().map_err(AppError::metrics)?);
    let (record_tx, record_rx) = mpsc::channel::<AttemptRecord>(RECORD_CHANNEL_CAPACITY);
    let collector = spawn_collector(aggregator.clone(), record_rx, config.count);

    let started_at = Utc::now();
    let pacer = Pacer::new(config.rate);
    let limiter = ConcurrencyLimiter::new(config.concurrency);
    let run_start = pacer.started_at();

    let mut shutdown_rx = shutdown_tx.subscribe();
    let mut attempts = JoinSet::new();
    let mut cancelled = false;

    for index in 0..config.count {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                cancelled = true;
            }
            _ = pacer.next_slot() => {}
        }
        if cancelled {
            break;
        }

        let admission = tokio::select! {
            _ = shutdown_rx.recv() => {
                cancelled = true;
                None
            }
            admission = limiter.acquire() => admission,
        };
        let Some(admission) = admission else {
            if cancelled {
                break;
            }
            return Err(AppError::campaign(CampaignError::LimiterClosed));
        };

        let connector = connector.clone();
        let record_tx = record_tx.clone();
        let attempt_timeout = config.attempt_timeout;
        let offset_ms = elapsed_ms(run_start);
        attempts.spawn(async move {
            let _admission = admission;
            let launch = Instant::now();
            let probe = execute_attempt(connector.as_ref(), attempt_timeout).await;
            let record = AttemptRecord {
                index,
                offset_ms,
                latency_ms: elapsed_ms(launch),
                auth_ms: probe.auth_ms,
                outcome: probe.outcome,
            };
            debug!(
                "Attempt {} finished: {} in {}ms",
                index,
                record.outcome.as_str(),
                record.latency_ms
            );
            drop(record_tx.send(record).await);
        });
    }
    drop(record_tx);
    if cancelled {
        info!("Cancellation requested; draining in-flight attempts");
    }

    while let Some(joined) = attempts.join_next().await {
        if let Err(err) = joined {
            warn!("Attempt task failed: {}", err);
        }
    }

    collector
        .await
        .map_err(|source| AppError::campaign(CampaignError::CollectorFailed { source }))?;

    let wall = run_start.elapsed();
    let peak_in_flight = u64::try_from(limiter.high_water()).unwrap_or(u64::MAX);
    let (records, summary) = aggregator
        .finalize(wall, peak_in_flight)
        .map_err(AppError::metrics)?;
    let status = if cancelled {
        CampaignStatus::Cancelled
    } else {
        CampaignStatus::Completed
    };
    info!(
        "Campaign {}: {} attempts recorded",
        status.as_str(),
        records.len()
    );

    Ok(ResultSet::new(
        ConfigSnapshot::from(&config),
        status,
        started_at,
        records,
        summary,
    ))
}

/// One attempt under the per-attempt deadline. The deadline is enforced here
/// so it binds any [`Connector`] implementation; an attempt can never
/// outlive it.
async fn execute_attempt(connector: &dyn Connector, deadline: Duration) -> Probe {
    match tokio::time::timeout(deadline, connector.connect_and_authenticate()).await {
        Ok(probe) => probe,
        Err(_) => Probe::failed(Outcome::Timeout),
    }
}

/// A target that cannot be resolved at all aborts the campaign before the
/// first attempt; transient resolution trouble on individual attempts is an
/// ordinary ConnectError outcome instead.
async fn resolve_target(config: &CampaignConfig) -> AppResult<()> {
    let mut addrs = tokio::net::lookup_host(config.endpoint.addr())
        .await
        .map_err(|source| {
            AppError::campaign(CampaignError::TargetUnresolvable {
                target: config.endpoint.to_string(),
                source,
            })
        })?;
    if addrs.next().is_none() {
        return Err(AppError::campaign(CampaignError::TargetNoAddresses {
            target: config.endpoint.to_string(),
        }));
    }
    Ok(())
}

fn spawn_collector(
    aggregator: Arc<ResultAggregator>,
    mut record_rx: mpsc::Receiver<AttemptRecord>,
    total: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut progress = tokio::time::interval(PROGRESS_INTERVAL);
        progress.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; consume it so progress lines
        // start one interval in.
        progress.tick().await;
        loop {
            tokio::select! {
                maybe_record = record_rx.recv() => {
                    match maybe_record {
                        Some(record) => {
                            if let Err(err) = aggregator.record(record) {
                                warn!("Failed to record attempt {}: {}", record.index, err);
                            }
                        }
                        None => break,
                    }
                }
                _ = progress.tick() => {
                    log_progress(&aggregator.snapshot(), total);
                }
            }
        }
    })
}

fn log_progress(snapshot: &ProgressSnapshot, total: u64) {
    info!(
        "Progress: {}/{} attempts complete ({} ok, {} failed)",
        snapshot.completed,
        total,
        snapshot.counts.success,
        snapshot.counts.failed()
    );
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
