//! Typed user model for the GitHub profile endpoint.

use serde::Deserialize;

/// A user profile as returned by `GET /users/{login}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub login: String,

    /// Display name, which many accounts leave unset.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub avatar_url: String,

    #[serde(default)]
    pub html_url: String,

    #[serde(default)]
    pub public_repos: u64,

    #[serde(default)]
    pub followers: u64,
}

impl UserProfile {
    /// The display name when set, otherwise the login.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}
