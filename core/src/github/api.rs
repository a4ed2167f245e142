//! GitHub repository variable write

use serde::Serialize;

use crate::config::SELF_HOSTED_VARIABLE;
use crate::error::{KillSwitchError, Result};
use crate::platform::HttpClient;

use super::{API_VERSION, USER_AGENT};

/// Value written to the flag; re-enabling is a manual action
pub const DISABLED_VALUE: &str = "false";

#[derive(Serialize)]
struct UpdateVariableRequest<'a> {
    value: &'a str,
}

/// Set `SELF_HOSTED_ENABLED` to `"false"` on `owner/repo`
///
/// Returns the HTTP status GitHub answered with. The response body is not
/// inspected, so a write over an already-disabled flag looks identical.
pub async fn disable_self_hosted_runners(
    api_base: &str,
    owner: &str,
    repo: &str,
    token: &str,
    http: &dyn HttpClient,
) -> Result<u16> {
    let url = format!(
        "{}/repos/{}/{}/actions/variables/{}",
        api_base, owner, repo, SELF_HOSTED_VARIABLE
    );

    let body = serde_json::to_vec(&UpdateVariableRequest {
        value: DISABLED_VALUE,
    })
    .map_err(|e| KillSwitchError::upstream(format!("failed to encode request: {}", e)))?;

    let auth_header = format!("Bearer {}", token);
    let headers = [
        ("Authorization", auth_header.as_str()),
        ("Accept", "application/vnd.github+json"),
        ("Content-Type", "application/json"),
        ("User-Agent", USER_AGENT),
        ("X-GitHub-Api-Version", API_VERSION),
    ];

    let response = http
        .patch(&url, &headers, &body)
        .await
        .map_err(|e| KillSwitchError::upstream(format!("failed to call GitHub API: {}", e)))?;

    if !response.is_success() {
        return Err(KillSwitchError::upstream(format!(
            "GitHub API error ({}) updating {}: {}",
            response.status,
            SELF_HOSTED_VARIABLE,
            response.text()
        )));
    }

    Ok(response.status)
}
