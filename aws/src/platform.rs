//! AWS platform implementations
//!
//! Implements core platform traits using native Rust libraries:
//! - SecretStore: SSM Parameter Store (aws-sdk-ssm)
//! - HttpClient: reqwest
//! - Clock: std::time::SystemTime
//! - Environment: std::env

use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use runner_killswitch_core::error::{KillSwitchError, Result};
use runner_killswitch_core::platform::{Clock, Environment, HttpClient, HttpResponse, SecretStore};

/// SSM Parameter Store client pinned to the configured region
pub struct SsmSecretStore {
    client: aws_sdk_ssm::Client,
}

impl SsmSecretStore {
    pub async fn new(region: &str) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: aws_sdk_ssm::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl SecretStore for SsmSecretStore {
    async fn get_secret(&self, name: &str, decrypt: bool) -> Result<String> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(decrypt)
            .send()
            .await
            .map_err(|e| {
                KillSwitchError::secret(format!(
                    "failed to read parameter '{}': {}",
                    name,
                    DisplayErrorContext(&e)
                ))
            })?;

        output
            .parameter()
            .and_then(|p| p.value())
            .map(str::to_string)
            .ok_or_else(|| KillSwitchError::secret(format!("parameter '{}' has no value", name)))
    }
}

/// reqwest-based HTTP client
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| KillSwitchError::configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn send(&self, builder: reqwest::RequestBuilder, method: &str) -> Result<HttpResponse> {
        let response = builder
            .send()
            .await
            .map_err(|e| KillSwitchError::upstream(format!("HTTP {} failed: {}", method, e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| KillSwitchError::upstream(format!("failed to read response: {}", e)))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post(&self, url: &str, headers: &[(&str, &str)], body: &[u8]) -> Result<HttpResponse> {
        let mut builder = self.client.post(url).body(body.to_vec());
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder, "POST").await
    }

    async fn patch(&self, url: &str, headers: &[(&str, &str)], body: &[u8]) -> Result<HttpResponse> {
        let mut builder = self.client.patch(url).body(body.to_vec());
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder, "PATCH").await
    }
}

/// System clock using std::time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs()
    }
}

/// Process environment of the Lambda function
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get_var(&self, name: &str) -> Result<String> {
        std::env::var(name).map_err(|_| {
            KillSwitchError::configuration(format!("environment variable '{}' not set", name))
        })
    }
}
