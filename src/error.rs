// Collector errors. Every variant fails the invocation; none are retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    /// The query succeeded but returned no datapoints (new instance, wrong identifier, idle metric).
    #[error("no datapoints for {namespace}/{metric} in window {window}")]
    NoDataAvailable {
        namespace: String,
        metric: String,
        window: String,
    },

    #[error("metrics query failed: {0}")]
    MetricsQuery(String),

    #[error("archive write to s3://{bucket}/{key} failed: {message}")]
    ArchiveWrite {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("archive mode requires an object writer")]
    MissingArchiveWriter,

    #[error("invalid collector configuration: {0}")]
    InvalidConfiguration(String),
}

impl CollectorError {
    /// Stable name reported to the invoker as the error type.
    pub fn error_type(&self) -> &'static str {
        match self {
            CollectorError::NoDataAvailable { .. } => "NoDataAvailable",
            CollectorError::MetricsQuery(_) => "MetricsQueryFailed",
            CollectorError::ArchiveWrite { .. } => "ArchiveWriteFailed",
            CollectorError::Serialization(_) => "SerializationFailed",
            CollectorError::MissingArchiveWriter | CollectorError::InvalidConfiguration(_) => {
                "InvalidConfiguration"
            }
        }
    }
}
