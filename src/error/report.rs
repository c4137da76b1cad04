use thiserror::Error;

/// Errors on the persisted result-set path. Fatal to the save/load workflow
/// they occur in; a live campaign is never affected by a load failure.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to read result file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write result file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize result set: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("Malformed result file '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Result file '{path}' uses format version {found}, expected {expected}.")]
    IncompatibleVersion {
        path: String,
        found: u32,
        expected: u32,
    },
}
