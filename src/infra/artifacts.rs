use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use std::path::Path;

/// Object store receiving the end-of-run artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn upload(&self, local: &Path, bucket: &str, key: &str) -> Result<()>;
}

pub struct S3ArtifactStore {
    client: aws_sdk_s3::Client,
}

impl S3ArtifactStore {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn upload(&self, local: &Path, bucket: &str, key: &str) -> Result<()> {
        let body = ByteStream::from_path(local)
            .await
            .with_context(|| format!("failed to read {}", local.display()))?;
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .with_context(|| format!("upload of {key} to {bucket} failed"))?;
        Ok(())
    }
}
