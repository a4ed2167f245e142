//! Mock implementations of platform traits for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use crate::error::{KillSwitchError, Result};
use crate::platform::{Clock, Environment, HttpClient, HttpResponse, SecretStore};

/// A request captured by [`MockHttp`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

/// Mock HTTP client with pre-configured responses, matched by URL substring
pub struct MockHttp {
    responses: Vec<(String, u16, Vec<u8>)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttp {
    pub fn new(responses: Vec<(&str, u16, &str)>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|(pattern, status, body)| (pattern.to_string(), status, body.as_bytes().to_vec()))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    fn respond(
        &self,
        method: &'static str,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_vec(),
        });

        for (pattern, status, body) in &self.responses {
            if url.contains(pattern.as_str()) {
                return Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                });
            }
        }
        Err(KillSwitchError::upstream(format!(
            "no mock response for {} {}",
            method, url
        )))
    }
}

#[async_trait]
impl HttpClient for MockHttp {
    async fn post(&self, url: &str, headers: &[(&str, &str)], body: &[u8]) -> Result<HttpResponse> {
        self.respond("POST", url, headers, body)
    }

    async fn patch(&self, url: &str, headers: &[(&str, &str)], body: &[u8]) -> Result<HttpResponse> {
        self.respond("PATCH", url, headers, body)
    }
}

/// Mock secret store backed by an in-memory HashMap
pub struct MockSecretStore {
    secrets: HashMap<String, String>,
    lookups: Mutex<Vec<(String, bool)>>,
}

impl MockSecretStore {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            secrets: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Names requested so far, with the decrypt flag each was requested with
    pub fn lookups(&self) -> Vec<(String, bool)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecretStore for MockSecretStore {
    async fn get_secret(&self, name: &str, decrypt: bool) -> Result<String> {
        self.lookups.lock().unwrap().push((name.to_string(), decrypt));
        self.secrets
            .get(name)
            .cloned()
            .ok_or_else(|| KillSwitchError::secret(format!("parameter '{}' not found", name)))
    }
}

/// Mock clock with a fixed timestamp
pub struct MockClock(pub u64);

impl Clock for MockClock {
    fn now_secs(&self) -> u64 {
        self.0
    }
}

/// Mock environment backed by an in-memory HashMap
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            vars: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Environment for MockEnv {
    fn get_var(&self, name: &str) -> Result<String> {
        self.vars
            .get(name)
            .cloned()
            .ok_or_else(|| KillSwitchError::configuration(format!("variable '{}' not found", name)))
    }
}

/// PKCS#1 PEM key pair generated once per test binary (never touches disk)
pub struct TestKeyPair {
    pub private_pem: String,
    pub public_pem: String,
}

pub fn test_key_pair() -> &'static TestKeyPair {
    static KEYS: OnceLock<TestKeyPair> = OnceLock::new();
    KEYS.get_or_init(generate_rsa_keypair)
}

pub fn generate_rsa_keypair() -> TestKeyPair {
    use rand::rngs::OsRng;
    use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding};
    use rsa::RsaPrivateKey;

    let private_key = RsaPrivateKey::new(&mut OsRng, 2048).expect("key generation failed");
    let private_pem = private_key
        .to_pkcs1_pem(LineEnding::LF)
        .expect("private key PEM export failed")
        .to_string();
    let public_pem = private_key
        .to_public_key()
        .to_pkcs1_pem(LineEnding::LF)
        .expect("public key PEM export failed");
    TestKeyPair {
        private_pem,
        public_pem,
    }
}
