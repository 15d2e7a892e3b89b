use aws_sdk_cloudwatch::types::StandardUnit;
use serde::Deserialize;

use crate::collector::{CollectorConfig, CollectorMode};
use crate::models::{Dimension, MetricQuery, Statistic};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub collector: CollectorSection,
    pub metric: MetricSection,
    #[serde(default)]
    pub archive: ArchiveSection,
    #[serde(default)]
    pub aws: AwsSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorSection {
    #[serde(default)]
    pub mode: CollectorMode,
    /// Width of the trailing query window.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u32,
}

fn default_window_minutes() -> u32 {
    120
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricSection {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_metric_name")]
    pub name: String,
    #[serde(default = "default_dimension_name")]
    pub dimension_name: String,
    /// Resource the metric is narrowed to, e.g. the DB instance identifier.
    pub dimension_value: String,
    #[serde(default = "default_period_secs")]
    pub period_secs: u32,
    #[serde(default)]
    pub statistic: Statistic,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_namespace() -> String {
    "AWS/RDS".into()
}

fn default_metric_name() -> String {
    "CPUUtilization".into()
}

fn default_dimension_name() -> String {
    "DBInstanceIdentifier".into()
}

fn default_period_secs() -> u32 {
    300
}

fn default_unit() -> String {
    "Percent".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveSection {
    /// Required in `archive` mode.
    #[serde(default)]
    pub bucket: String,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for ArchiveSection {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_key_prefix() -> String {
    "rds-cpu-metrics".into()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AwsSection {
    /// Overrides the region from the default provider chain (AWS_REGION, profile, IMDS).
    pub region: Option<String>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &str) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Collector settings derived from this config.
    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            mode: self.collector.mode,
            window: chrono::Duration::minutes(self.collector.window_minutes as i64),
            query: MetricQuery {
                namespace: self.metric.namespace.clone(),
                metric_name: self.metric.name.clone(),
                dimension: Dimension {
                    name: self.metric.dimension_name.clone(),
                    value: self.metric.dimension_value.clone(),
                },
                period_secs: self.metric.period_secs,
                statistic: self.metric.statistic,
                unit: self.metric.unit.clone(),
            },
            bucket: self.archive.bucket.clone(),
            key_prefix: self.archive.key_prefix.clone(),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.collector.window_minutes > 0,
            "collector.window_minutes must be > 0, got {}",
            self.collector.window_minutes
        );
        anyhow::ensure!(
            !self.metric.namespace.is_empty(),
            "metric.namespace must be non-empty"
        );
        anyhow::ensure!(!self.metric.name.is_empty(), "metric.name must be non-empty");
        anyhow::ensure!(
            !self.metric.dimension_name.is_empty(),
            "metric.dimension_name must be non-empty"
        );
        anyhow::ensure!(
            !self.metric.dimension_value.is_empty(),
            "metric.dimension_value must be non-empty"
        );
        anyhow::ensure!(
            StandardUnit::values().contains(&self.metric.unit.as_str()),
            "metric.unit must be a CloudWatch unit (e.g. \"Percent\"), got {:?}",
            self.metric.unit
        );
        anyhow::ensure!(
            self.metric.period_secs > 0 && self.metric.period_secs % 60 == 0,
            "metric.period_secs must be a positive multiple of 60, got {}",
            self.metric.period_secs
        );
        anyhow::ensure!(
            self.metric.period_secs <= i32::MAX as u32,
            "metric.period_secs out of range, got {}",
            self.metric.period_secs
        );
        anyhow::ensure!(
            self.collector.window_minutes as u64 * 60 >= self.metric.period_secs as u64,
            "collector.window_minutes must cover at least one period ({}s), got {}",
            self.metric.period_secs,
            self.collector.window_minutes
        );
        if self.collector.mode == CollectorMode::Archive {
            anyhow::ensure!(
                !self.archive.bucket.is_empty(),
                "archive.bucket must be non-empty in archive mode"
            );
        }
        anyhow::ensure!(
            !self.archive.key_prefix.is_empty() && !self.archive.key_prefix.contains('/'),
            "archive.key_prefix must be non-empty and must not contain '/', got {:?}",
            self.archive.key_prefix
        );
        if let Some(region) = &self.aws.region {
            anyhow::ensure!(!region.is_empty(), "aws.region must be non-empty when set");
        }
        Ok(())
    }
}
