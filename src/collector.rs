// Metric snapshot collector: window -> query -> reshape -> (archive) -> payload.
// One linear pass per invocation; the metrics reader and object writer are injected.

use crate::archive_repo::ObjectWriter;
use crate::error::CollectorError;
use crate::metrics_repo::MetricsReader;
use crate::models::{Datapoint, FormattedDatapoint, MetricQuery, TimeWindow, archive_key};
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// What an invocation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectorMode {
    /// First datapoint's value as a bare JSON number.
    Average,
    /// All datapoints as a JSON array, also written to the archive bucket.
    #[default]
    Archive,
}

#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub mode: CollectorMode,
    pub window: Duration,
    pub query: MetricQuery,
    pub bucket: String,
    pub key_prefix: String,
}

/// Result of an archive pass: where the body went and what it was.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveOutcome {
    pub key: String,
    pub body: String,
    pub datapoints: usize,
}

pub struct MetricSnapshotCollector {
    config: CollectorConfig,
    metrics: Arc<dyn MetricsReader>,
    writer: Option<Arc<dyn ObjectWriter>>,
}

impl MetricSnapshotCollector {
    /// `writer` may be None in `average` mode; `archive` mode fails with `MissingArchiveWriter` without one.
    /// Rejects a non-positive window.
    pub fn new(
        config: CollectorConfig,
        metrics: Arc<dyn MetricsReader>,
        writer: Option<Arc<dyn ObjectWriter>>,
    ) -> Result<Self, CollectorError> {
        if config.window <= Duration::zero() {
            return Err(CollectorError::InvalidConfiguration(format!(
                "window must be positive, got {}s",
                config.window.num_seconds()
            )));
        }
        Ok(Self {
            config,
            metrics,
            writer,
        })
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn window_at(&self, now: DateTime<Utc>) -> Result<TimeWindow, CollectorError> {
        TimeWindow::ending_at(now, self.config.window).ok_or_else(|| {
            CollectorError::InvalidConfiguration(format!(
                "window must be positive, got {}s",
                self.config.window.num_seconds()
            ))
        })
    }

    /// Queries the window ending at `now`. Datapoints are sorted by timestamp ascending.
    pub async fn fetch(
        &self,
        now: DateTime<Utc>,
    ) -> Result<(TimeWindow, Vec<Datapoint>), CollectorError> {
        let window = self.window_at(now)?;
        let mut points = self
            .metrics
            .get_statistics(&self.config.query, &window)
            .await?;
        points.sort_by_key(|p| p.timestamp);
        Ok((window, points))
    }

    /// Value of the earliest datapoint in the window.
    #[instrument(skip(self))]
    pub async fn collect_average(&self, now: DateTime<Utc>) -> Result<f64, CollectorError> {
        let (window, points) = self.fetch(now).await?;
        let Some(first) = points.first() else {
            return Err(CollectorError::NoDataAvailable {
                namespace: self.config.query.namespace.clone(),
                metric: self.config.query.metric_name.clone(),
                window: window.to_string(),
            });
        };
        info!(
            operation = "collect_average",
            datapoints = points.len(),
            value = first.value,
            "metric collected"
        );
        Ok(first.value)
    }

    /// Formats every datapoint, writes the JSON array to `bucket/key` and returns it.
    /// An empty window still writes (and returns) `[]`.
    #[instrument(skip(self))]
    pub async fn collect_archive(
        &self,
        now: DateTime<Utc>,
    ) -> Result<ArchiveOutcome, CollectorError> {
        let writer = self
            .writer
            .as_ref()
            .ok_or(CollectorError::MissingArchiveWriter)?;
        let (window, points) = self.fetch(now).await?;
        let body = serialize_datapoints(&points)?;
        let key = archive_key(&self.config.key_prefix, &window);

        writer
            .put_object(&self.config.bucket, &key, Bytes::from(body.clone()))
            .await?;
        info!(
            operation = "collect_archive",
            bucket = %self.config.bucket,
            key = %key,
            datapoints = points.len(),
            "metrics archived"
        );
        Ok(ArchiveOutcome {
            key,
            body,
            datapoints: points.len(),
        })
    }

    /// Runs one collection in the configured mode and returns the serialized payload.
    pub async fn invoke(&self, now: DateTime<Utc>) -> Result<String, CollectorError> {
        match self.config.mode {
            CollectorMode::Average => {
                let value = self.collect_average(now).await?;
                Ok(serde_json::to_string(&value)?)
            }
            CollectorMode::Archive => Ok(self.collect_archive(now).await?.body),
        }
    }
}

/// JSON array of formatted datapoints, in input order.
pub fn serialize_datapoints(points: &[Datapoint]) -> Result<String, serde_json::Error> {
    let formatted: Vec<FormattedDatapoint> = points.iter().map(FormattedDatapoint::from).collect();
    serde_json::to_string(&formatted)
}
