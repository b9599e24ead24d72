use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_ec2::types::Filter;

/// Read-only count of infrastructure instances in a running state.
#[async_trait]
pub trait InstanceProvider: Send + Sync {
    async fn running_count(&self) -> Result<usize>;
}

pub struct Ec2InstanceProvider {
    client: aws_sdk_ec2::Client,
}

impl Ec2InstanceProvider {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_ec2::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl InstanceProvider for Ec2InstanceProvider {
    async fn running_count(&self) -> Result<usize> {
        let resp = self
            .client
            .describe_instances()
            .filters(
                Filter::builder()
                    .name("instance-state-name")
                    .values("running")
                    .build(),
            )
            .send()
            .await
            .context("describe_instances failed")?;

        Ok(resp
            .reservations()
            .iter()
            .map(|r| r.instances().len())
            .sum())
    }
}
