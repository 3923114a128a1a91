use std::path::PathBuf;

/// Why a BLOCK line could not be turned into a directed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Neither `IN=` nor `OUT=` carried an interface.
    NoInterface,
    /// Both `IN=` and `OUT=` carried an interface.
    BothInterfaces,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedReason::NoInterface => f.write_str("neither IN nor OUT interface is set"),
            MalformedReason::BothInterfaces => f.write_str("both IN and OUT interfaces are set"),
        }
    }
}

/// A line flagged as a block event that has no usable direction.
/// Never fatal: the caller skips the line and keeps scanning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed block event: {reason}")]
pub struct MalformedEvent {
    pub reason: MalformedReason,
}

impl MalformedEvent {
    pub fn new(reason: MalformedReason) -> Self {
        Self { reason }
    }
}

/// Errors from the log line source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("log file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reader thread panicked")]
    ReaderPanicked,
}

/// Top-level error for a firelog run.
#[derive(Debug, thiserror::Error)]
pub enum FirelogError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
