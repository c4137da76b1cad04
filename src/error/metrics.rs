use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Attempt recorded after the result set was finalized.")]
    RecordAfterFinalize,
    #[error("Result set finalized twice.")]
    AlreadyFinalized,
    #[error("Failed to create latency histogram: {source}")]
    HistogramCreate {
        #[source]
        source: hdrhistogram::CreationError,
    },
    #[error("Failed to record latency: {source}")]
    HistogramRecord {
        #[source]
        source: hdrhistogram::RecordError,
    },
}
