//! Invocation configuration

use crate::error::{KillSwitchError, Result};
use crate::platform::Environment;

/// Default GitHub REST API base
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Repository variable consulted by workflows to pick a runner pool
pub const SELF_HOSTED_VARIABLE: &str = "SELF_HOSTED_ENABLED";

/// Configuration loaded once from the environment and passed into the pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Region of the secret store (e.g., "us-east-1")
    pub region: String,
    /// Parameter path prefix; secrets live under `/{prefix}/...`
    pub prefix: String,
    /// Owner of the repository carrying the flag
    pub github_owner: String,
    /// Name of the repository carrying the flag
    pub github_repo: String,
    /// GitHub API base URL, without trailing slash
    pub github_api_base: String,
}

impl Config {
    /// Load configuration from platform environment
    pub fn from_env(env: &dyn Environment) -> Result<Self> {
        let github_api_base = match env.get_var("GITHUB_API_URL") {
            Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => GITHUB_API_BASE.to_string(),
        };

        Ok(Self {
            region: required(env, "AWS_REGION")?,
            prefix: required(env, "PREFIX")?,
            github_owner: required(env, "GITHUB_OWNER")?,
            github_repo: required(env, "GITHUB_REPO")?,
            github_api_base,
        })
    }
}

fn required(env: &dyn Environment, name: &str) -> Result<String> {
    let value = env
        .get_var(name)
        .map_err(|_| KillSwitchError::configuration(format!("{} not configured", name)))?;
    if value.trim().is_empty() {
        return Err(KillSwitchError::configuration(format!("{} is empty", name)));
    }
    Ok(value)
}
