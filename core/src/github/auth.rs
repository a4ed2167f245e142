//! GitHub App authentication
//!
//! Generates App JWTs and exchanges them for installation tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{KillSwitchError, Result};
use crate::platform::HttpClient;

use super::{API_VERSION, USER_AGENT};

/// Backdating applied to `iat` to tolerate clock skew with GitHub
pub const CLOCK_SKEW_SECS: i64 = 60;

/// Lifetime of an App JWT, counted from `iat` (GitHub's maximum)
pub const APP_JWT_LIFETIME_SECS: i64 = 600;

/// GitHub App JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct AppJwtClaims {
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

impl AppJwtClaims {
    pub fn new(app_id: &str, now_secs: i64) -> Self {
        let iat = now_secs - CLOCK_SKEW_SECS;
        Self {
            iat,
            exp: iat + APP_JWT_LIFETIME_SECS,
            iss: app_id.to_string(),
        }
    }
}

/// Installation token response from GitHub
#[derive(Deserialize)]
struct InstallationTokenResponse {
    token: String,
    #[serde(default)]
    expires_at: Option<String>,
}

/// Scoped bearer token for one installation
pub struct InstallationToken {
    pub token: String,
    pub expires_at: Option<String>,
}

impl fmt::Debug for InstallationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallationToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// JWT signer that uses a PEM private key fetched from the secret store
pub struct PemJwtSigner<'a> {
    pub app_id: &'a str,
    pub pem_key: &'a str,
}

impl PemJwtSigner<'_> {
    /// Sign an RS256 App JWT valid from `now_secs - 60` for 600 seconds
    pub fn sign_app_jwt(&self, now_secs: i64) -> Result<String> {
        use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

        let claims = AppJwtClaims::new(self.app_id, now_secs);

        let key = EncodingKey::from_rsa_pem(self.pem_key.as_bytes())
            .map_err(|e| KillSwitchError::authentication(format!("invalid private key: {}", e)))?;

        let header = Header::new(Algorithm::RS256);

        encode(&header, &claims, &key)
            .map_err(|e| KillSwitchError::authentication(format!("failed to encode JWT: {}", e)))
    }
}

/// Exchange an App JWT for an installation token
///
/// Exactly one POST; any non-2xx status fails without retry.
pub async fn create_installation_token(
    api_base: &str,
    installation_id: u64,
    app_jwt: &str,
    http: &dyn HttpClient,
) -> Result<InstallationToken> {
    let url = format!(
        "{}/app/installations/{}/access_tokens",
        api_base, installation_id
    );

    let auth_header = format!("Bearer {}", app_jwt);
    let headers = [
        ("Authorization", auth_header.as_str()),
        ("Accept", "application/vnd.github+json"),
        ("User-Agent", USER_AGENT),
        ("X-GitHub-Api-Version", API_VERSION),
    ];

    let response = http
        .post(&url, &headers, &[])
        .await
        .map_err(|e| KillSwitchError::upstream(format!("failed to call GitHub API: {}", e)))?;

    if !response.is_success() {
        return Err(KillSwitchError::upstream(format!(
            "GitHub API error ({}) creating installation token: {}",
            response.status,
            response.text()
        )));
    }

    let token_response: InstallationTokenResponse = response.json().map_err(|e| {
        KillSwitchError::upstream(format!("failed to parse installation token response: {}", e))
    })?;

    Ok(InstallationToken {
        token: token_response.token,
        expires_at: token_response.expires_at,
    })
}
