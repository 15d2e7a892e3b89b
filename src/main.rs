use anyhow::Result;
use lambda_runtime::{LambdaEvent, service_fn};
use rds_metrics_collector::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct UtcTimer;

impl FormatTime for UtcTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(UtcTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        mode = ?app_config.collector.mode,
        metric = %app_config.metric.name,
        dimension_value = %app_config.metric.dimension_value,
        "starting collector"
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = app_config.aws.region.clone() {
        loader = loader.region(aws_config::Region::new(region));
    }
    if let Some(app_name) = version::app_name() {
        loader = loader.app_name(app_name);
    }
    let sdk_config = loader.load().await;

    let collector_config = app_config.collector_config();
    let metrics: Arc<dyn metrics_repo::MetricsReader> =
        Arc::new(metrics_repo::CloudWatchRepo::from_sdk_config(&sdk_config));
    let writer: Option<Arc<dyn archive_repo::ObjectWriter>> = match collector_config.mode {
        collector::CollectorMode::Archive => Some(Arc::new(
            archive_repo::S3ArchiveRepo::from_sdk_config(&sdk_config),
        )),
        collector::CollectorMode::Average => None,
    };
    let collector = Arc::new(collector::MetricSnapshotCollector::new(
        collector_config,
        metrics,
        writer,
    )?);

    let in_lambda = std::env::var_os("AWS_LAMBDA_RUNTIME_API").is_some();

    if in_lambda {
        lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
            let collector = collector.clone();
            async move { handler::handle(&collector, event).await }
        }))
        .await
        .map_err(|e| anyhow::anyhow!("lambda runtime: {}", e))?;
    } else {
        // Local run: one invocation, payload to stdout
        let payload = collector.invoke(chrono::Utc::now()).await?;
        println!("{}", payload);
    }

    Ok(())
}
