// Shared test helpers: in-memory metrics reader / object writer, fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use rds_metrics_collector::archive_repo::ObjectWriter;
use rds_metrics_collector::collector::{CollectorConfig, CollectorMode};
use rds_metrics_collector::error::CollectorError;
use rds_metrics_collector::metrics_repo::MetricsReader;
use rds_metrics_collector::models::*;
use std::sync::Mutex;

pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("rfc3339 timestamp")
        .with_timezone(&Utc)
}

pub fn cpu_point(ts: &str, value: f64) -> Datapoint {
    Datapoint {
        timestamp: utc(ts),
        statistic: Statistic::Average,
        value,
        unit: "Percent".into(),
    }
}

pub fn test_config(mode: CollectorMode) -> CollectorConfig {
    CollectorConfig {
        mode,
        window: Duration::hours(2),
        query: MetricQuery {
            namespace: "AWS/RDS".into(),
            metric_name: "CPUUtilization".into(),
            dimension: Dimension {
                name: "DBInstanceIdentifier".into(),
                value: "mysql-test2".into(),
            },
            period_secs: 300,
            statistic: Statistic::Average,
            unit: "Percent".into(),
        },
        bucket: "rds-metrics-archive".into(),
        key_prefix: "rds-cpu-metrics".into(),
    }
}

/// Returns canned datapoints (or a canned failure) and records every query.
pub struct FakeMetrics {
    points: Vec<Datapoint>,
    fail: bool,
    pub calls: Mutex<Vec<(MetricQuery, TimeWindow)>>,
}

impl FakeMetrics {
    pub fn with_points(points: Vec<Datapoint>) -> Self {
        Self {
            points,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            points: vec![],
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MetricsReader for FakeMetrics {
    async fn get_statistics(
        &self,
        query: &MetricQuery,
        window: &TimeWindow,
    ) -> Result<Vec<Datapoint>, CollectorError> {
        self.calls.lock().unwrap().push((query.clone(), *window));
        if self.fail {
            return Err(CollectorError::MetricsQuery("throttled".into()));
        }
        Ok(self.points.clone())
    }
}

/// Stored object: (bucket, key, body).
pub type StoredObject = (String, String, Vec<u8>);

#[derive(Default)]
pub struct RecordingWriter {
    fail: bool,
    pub objects: Mutex<Vec<StoredObject>>,
}

impl RecordingWriter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            objects: Mutex::new(Vec::new()),
        }
    }

    pub fn stored(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectWriter for RecordingWriter {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
    ) -> Result<(), CollectorError> {
        if self.fail {
            return Err(CollectorError::ArchiveWrite {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "service unavailable".into(),
            });
        }
        self.objects
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string(), body.to_vec()));
        Ok(())
    }
}
