//! AWS Bedrock runtime client
//!
//! Implements [`ModelRuntime`] on top of the official
//! `aws-sdk-bedrockruntime` crate's `InvokeModel` operation.
//!
//! # Authentication
//!
//! Credentials are resolved in the standard AWS order:
//! environment variables → shared credentials file → IAM instance profile.
//! Region comes from [`BedrockConfig::region`] when set, otherwise from the
//! same chain.
//!
//! The SDK's built-in retry policy is disabled: a failed call fails once and
//! the error is surfaced unchanged.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::config::{Builder as BedrockBuilder, Region};
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use docchat_kernel::llm::{ModelError, ModelResult, ModelRuntime};
use serde::{Deserialize, Serialize};

const JSON_CONTENT_TYPE: &str = "application/json";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for [`BedrockRuntime`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BedrockConfig {
    /// AWS region (e.g. `"us-east-1"`); `None` defers to the AWS chain
    pub region: Option<String>,
    /// Named profile from the shared config files
    pub profile: Option<String>,
    /// Optional custom endpoint URL (VPC endpoints, local mocks)
    pub endpoint_url: Option<String>,
}

impl BedrockConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Default::default()
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BedrockRuntime
// ─────────────────────────────────────────────────────────────────────────────

/// Model runtime backed by Amazon Bedrock.
pub struct BedrockRuntime {
    client: Client,
}

impl BedrockRuntime {
    /// Build the runtime from a [`BedrockConfig`], loading AWS credentials
    /// from the environment using the standard credential chain.
    pub async fn new(config: BedrockConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        let sdk_config = loader.load().await;
        let mut builder = BedrockBuilder::from(&sdk_config);

        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        tracing::debug!(
            region = ?sdk_config.region().map(|r| r.as_ref().to_string()),
            endpoint = ?config.endpoint_url,
            "bedrock runtime client configured"
        );

        Self {
            client: Client::from_conf(builder.build()),
        }
    }

    /// Wrap an already-built SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelRuntime for BedrockRuntime {
    fn name(&self) -> &str {
        "bedrock"
    }

    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> ModelResult<Vec<u8>> {
        tracing::debug!(model_id, request_bytes = body.len(), "invoking model");

        let response = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                ModelError::Api(format!(
                    "InvokeModel failed for '{model_id}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let bytes = response.body().as_ref().to_vec();
        tracing::debug!(model_id, response_bytes = bytes.len(), "model responded");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let cfg = BedrockConfig::new("us-west-2")
            .with_profile("dev")
            .with_endpoint("http://localhost:4566");
        assert_eq!(cfg.region.as_deref(), Some("us-west-2"));
        assert_eq!(cfg.profile.as_deref(), Some("dev"));
        assert_eq!(cfg.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn config_default_defers_to_chain() {
        let cfg = BedrockConfig::default();
        assert!(cfg.region.is_none());
        assert!(cfg.profile.is_none());
        assert!(cfg.endpoint_url.is_none());
    }
}
