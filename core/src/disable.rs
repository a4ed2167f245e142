//! Budget alert handler
//!
//! Fetches the App credentials, mints an App JWT, exchanges it for an
//! installation token and flips `SELF_HOSTED_ENABLED` to `"false"`. Every step
//! waits on the previous one and the first failure aborts the invocation.

use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::config::Config;
use crate::error::Result;
use crate::github;
use crate::platform::{Clock, HttpClient, SecretStore};
use crate::secrets;

pub const SUCCESS_BODY: &str = "Self-hosted runners disabled";

/// Invocation result returned to the trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisableResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl DisableResponse {
    pub fn disabled() -> Self {
        Self {
            status_code: 200,
            body: SUCCESS_BODY.to_string(),
        }
    }
}

/// Handle one budget alert
///
/// `event` is the trigger payload; it is logged and otherwise ignored.
pub async fn handle(
    event: &serde_json::Value,
    config: &Config,
    store: &dyn SecretStore,
    http: &dyn HttpClient,
    clock: &dyn Clock,
) -> Result<DisableResponse> {
    let span = tracing::info_span!(
        "disable_self_hosted_runners",
        owner = %config.github_owner,
        repo = %config.github_repo,
    );

    let result = run(event, config, store, http, clock).instrument(span.clone()).await;
    if let Err(e) = &result {
        span.in_scope(|| tracing::error!(error_key = e.error_key(), error = %e, "disable failed"));
    }
    result
}

async fn run(
    event: &serde_json::Value,
    config: &Config,
    store: &dyn SecretStore,
    http: &dyn HttpClient,
    clock: &dyn Clock,
) -> Result<DisableResponse> {
    tracing::info!(event = %event, "budget alert received");

    // 1. All three secrets are read before any network call to GitHub
    let bundle = secrets::fetch_bundle(&config.prefix, store).await?;
    tracing::info!(
        app_id = %bundle.app_id,
        installation_id = bundle.installation_id,
        "secrets fetched"
    );

    // 2. App JWT
    let signer = github::auth::PemJwtSigner {
        app_id: &bundle.app_id,
        pem_key: &bundle.private_key,
    };
    let app_jwt = signer.sign_app_jwt(clock.now_secs() as i64)?;
    tracing::info!("app assertion minted");

    // 3. Installation token
    let token = github::auth::create_installation_token(
        &config.github_api_base,
        bundle.installation_id,
        &app_jwt,
        http,
    )
    .await?;
    tracing::info!(expires_at = ?token.expires_at, "installation token obtained");

    // 4. The only state-changing call
    let status = github::api::disable_self_hosted_runners(
        &config.github_api_base,
        &config.github_owner,
        &config.github_repo,
        &token.token,
        http,
    )
    .await?;
    tracing::info!(status, "self-hosted runner flag written");

    Ok(DisableResponse::disabled())
}
