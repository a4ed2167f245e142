//! Platform abstraction traits
//!
//! These traits define the boundary between the platform-agnostic pipeline and
//! platform-specific implementations (AWS Lambda today).

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Name-addressed secret store (SSM Parameter Store on AWS)
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch a secret value, asking the store to decrypt it when `decrypt` is set
    async fn get_secret(&self, name: &str, decrypt: bool) -> Result<String>;
}

/// HTTP client for outbound GitHub API requests
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn post(&self, url: &str, headers: &[(&str, &str)], body: &[u8]) -> Result<HttpResponse>;
    async fn patch(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse>;
}

/// HTTP response from an outbound request
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossy so error bodies always render
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Clock for current time (enables testing with deterministic timestamps)
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> u64;
}

/// Process environment access
pub trait Environment {
    fn get_var(&self, name: &str) -> Result<String>;
}
