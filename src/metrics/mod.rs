//! Per-attempt outcome records, aggregation, and histogram utilities.
mod aggregator;
mod histogram;
mod types;


pub use aggregator::ResultAggregator;
pub use histogram::LatencyHistogram;
pub use types::{
    AttemptRecord, CampaignStatus, CampaignSummary, Outcome, OutcomeCounts, ProgressSnapshot,
};
