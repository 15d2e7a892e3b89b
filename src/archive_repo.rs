// Archive objects in S3 (one PutObject per invocation)

use crate::error::CollectorError;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, instrument};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Writes one object to durable storage. Existing objects under the same key are overwritten.
#[async_trait]
pub trait ObjectWriter: Send + Sync {
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), CollectorError>;
}

pub struct S3ArchiveRepo {
    client: Client,
}

impl S3ArchiveRepo {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl ObjectWriter for S3ArchiveRepo {
    #[instrument(skip(self, body), fields(bytes = body.len()))]
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
    ) -> Result<(), CollectorError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(CONTENT_TYPE_JSON)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| CollectorError::ArchiveWrite {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        debug!(operation = "put_object", "archive object written");
        Ok(())
    }
}
