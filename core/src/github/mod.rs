//! GitHub API module
//!
//! Handles GitHub App authentication and the repository variable write.

pub mod api;
pub mod auth;

pub(crate) const USER_AGENT: &str = "runner-killswitch";
pub(crate) const API_VERSION: &str = "2022-11-28";
