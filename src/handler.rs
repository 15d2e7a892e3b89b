// Lambda entry point. The event payload and context are accepted but unused beyond logging.

use crate::collector::MetricSnapshotCollector;
use crate::error::CollectorError;
use chrono::Utc;
use lambda_runtime::{Diagnostic, LambdaEvent};
use serde_json::Value;
use tracing::{info, warn};

/// Runs one collection at the current time and returns the serialized payload.
pub async fn handle(
    collector: &MetricSnapshotCollector,
    event: LambdaEvent<Value>,
) -> Result<String, CollectorError> {
    let request_id = event.context.request_id;
    match collector.invoke(Utc::now()).await {
        Ok(payload) => {
            info!(
                request_id = %request_id,
                payload_bytes = payload.len(),
                "invocation complete"
            );
            Ok(payload)
        }
        Err(e) => {
            warn!(
                request_id = %request_id,
                error = %e,
                error_type = e.error_type(),
                "invocation failed"
            );
            Err(e)
        }
    }
}

impl From<CollectorError> for Diagnostic {
    fn from(error: CollectorError) -> Diagnostic {
        Diagnostic {
            error_type: error.error_type().into(),
            error_message: error.to_string(),
        }
    }
}
