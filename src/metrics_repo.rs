// Metric statistics via CloudWatch GetMetricStatistics

use crate::error::CollectorError;
use crate::models::{Datapoint, MetricQuery, Statistic, TimeWindow};
use async_trait::async_trait;
use aws_sdk_cloudwatch::Client;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::primitives::DateTime as AwsDateTime;
use aws_sdk_cloudwatch::types::{
    Datapoint as AwsDatapoint, Dimension as AwsDimension, StandardUnit,
    Statistic as AwsStatistic,
};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

/// Reads aggregated statistics for one metric over a window.
#[async_trait]
pub trait MetricsReader: Send + Sync {
    /// Datapoints in the order the service returned them.
    async fn get_statistics(
        &self,
        query: &MetricQuery,
        window: &TimeWindow,
    ) -> Result<Vec<Datapoint>, CollectorError>;
}

pub struct CloudWatchRepo {
    client: Client,
}

impl CloudWatchRepo {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }

    fn to_aws_datetime(ts: DateTime<Utc>) -> AwsDateTime {
        AwsDateTime::from_millis(ts.timestamp_millis())
    }

    fn from_aws_datetime(ts: &AwsDateTime) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
    }

    fn statistic_value(dp: &AwsDatapoint, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::Average => dp.average(),
            Statistic::Sum => dp.sum(),
            Statistic::Minimum => dp.minimum(),
            Statistic::Maximum => dp.maximum(),
            Statistic::SampleCount => dp.sample_count(),
        }
    }

    /// None when the datapoint lacks a timestamp or the requested statistic.
    /// A missing unit falls back to the queried unit.
    fn convert_datapoint(dp: &AwsDatapoint, query: &MetricQuery) -> Option<Datapoint> {
        let timestamp = dp.timestamp().and_then(Self::from_aws_datetime)?;
        let value = Self::statistic_value(dp, query.statistic)?;
        let unit = dp
            .unit()
            .map(|u| u.as_str().to_string())
            .unwrap_or_else(|| query.unit.clone());
        Some(Datapoint {
            timestamp,
            statistic: query.statistic,
            value,
            unit,
        })
    }
}

#[async_trait]
impl MetricsReader for CloudWatchRepo {
    #[instrument(skip_all, fields(namespace = %query.namespace, metric = %query.metric_name, window = %window))]
    async fn get_statistics(
        &self,
        query: &MetricQuery,
        window: &TimeWindow,
    ) -> Result<Vec<Datapoint>, CollectorError> {
        let dimension = AwsDimension::builder()
            .name(&query.dimension.name)
            .value(&query.dimension.value)
            .build();
        let period = i32::try_from(query.period_secs).map_err(|_| {
            CollectorError::MetricsQuery(format!("period out of range: {}", query.period_secs))
        })?;

        let output = self
            .client
            .get_metric_statistics()
            .namespace(&query.namespace)
            .metric_name(&query.metric_name)
            .dimensions(dimension)
            .start_time(Self::to_aws_datetime(window.start()))
            .end_time(Self::to_aws_datetime(window.end()))
            .period(period)
            .statistics(AwsStatistic::from(query.statistic.as_str()))
            .unit(StandardUnit::from(query.unit.as_str()))
            .send()
            .await
            .map_err(|e| CollectorError::MetricsQuery(DisplayErrorContext(&e).to_string()))?;

        let raw = output.datapoints();
        let mut points = Vec::with_capacity(raw.len());
        for dp in raw {
            match Self::convert_datapoint(dp, query) {
                Some(p) => points.push(p),
                None => warn!(
                    operation = "get_statistics",
                    statistic = %query.statistic,
                    "skipping datapoint without timestamp or statistic value"
                ),
            }
        }
        debug!(
            operation = "get_statistics",
            datapoints = points.len(),
            "statistics fetched"
        );
        Ok(points)
    }
}
