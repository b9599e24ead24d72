use anyhow::{Context, Result};
use async_trait::async_trait;

/// Read-only key/value configuration service used to discover the current
/// target endpoint.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<String>;
}

pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get(&self, name: &str) -> Result<String> {
        let out = self
            .client
            .get_parameter()
            .name(name)
            .send()
            .await
            .with_context(|| format!("get_parameter {name} failed"))?;
        out.parameter
            .and_then(|p| p.value)
            .with_context(|| format!("parameter {name} has no value"))
    }
}
