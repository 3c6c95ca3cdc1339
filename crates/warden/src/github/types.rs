//! GitHub API wire types.

use serde::Deserialize;

/// GitHub repository - fields we need from the API response.
///
/// Only the consumed fields are declared, which keeps deserialization
/// resilient to API additions.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepo {
    /// Repository name.
    pub name: String,
    /// Repository description (may be null).
    pub description: Option<String>,
    /// Primary programming language (may be null).
    pub language: Option<String>,
    /// Owner information.
    pub owner: GithubOwner,
}

/// GitHub user/organization.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubOwner {
    /// Username/login.
    pub login: String,
    /// Avatar URL.
    pub avatar_url: Option<String>,
}
