//! GitHub App credentials held in the secret store
//!
//! Fetched fresh on every invocation and never cached.

use std::fmt;

use crate::error::{KillSwitchError, Result};
use crate::platform::SecretStore;

pub const APP_ID_SUFFIX: &str = "github-app-id";
pub const APP_KEY_SUFFIX: &str = "github-app-key";
pub const INSTALLATION_ID_SUFFIX: &str = "github-app-installation-id";

/// The three values needed to act as the GitHub App installation
pub struct SecretBundle {
    pub app_id: String,
    /// PEM-encoded RSA private key
    pub private_key: String,
    pub installation_id: u64,
}

impl fmt::Debug for SecretBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBundle")
            .field("app_id", &self.app_id)
            .field("private_key", &"<redacted>")
            .field("installation_id", &self.installation_id)
            .finish()
    }
}

/// Build the parameter path `/{prefix}/{suffix}`
pub fn parameter_name(prefix: &str, suffix: &str) -> String {
    format!("/{}/{}", prefix, suffix)
}

/// Read the app id, private key and installation id under `prefix`
///
/// Only the private key is requested with decryption.
pub async fn fetch_bundle(prefix: &str, store: &dyn SecretStore) -> Result<SecretBundle> {
    let app_id = store
        .get_secret(&parameter_name(prefix, APP_ID_SUFFIX), false)
        .await?;
    let private_key = store
        .get_secret(&parameter_name(prefix, APP_KEY_SUFFIX), true)
        .await?;
    let installation_id_name = parameter_name(prefix, INSTALLATION_ID_SUFFIX);
    let raw_installation_id = store.get_secret(&installation_id_name, false).await?;

    let installation_id = raw_installation_id.trim().parse::<u64>().map_err(|_| {
        KillSwitchError::configuration(format!(
            "{} is not a numeric installation id",
            installation_id_name
        ))
    })?;

    Ok(SecretBundle {
        app_id: app_id.trim().to_string(),
        private_key,
        installation_id,
    })
}
