//! runner-killswitch-core: Platform-agnostic logic for the self-hosted runner kill switch
//!
//! On a budget alert, fetches GitHub App credentials from a secret store, mints
//! an App JWT, exchanges it for an installation token and sets the repository
//! variable `SELF_HOSTED_ENABLED` to `"false"`. It depends only on abstract
//! platform traits (SecretStore, HttpClient, Clock, Environment) and never
//! imports platform-specific code.

pub mod config;
pub mod disable;
pub mod error;
pub mod github;
pub mod platform;
pub mod secrets;

#[cfg(test)]
pub mod test_support;
