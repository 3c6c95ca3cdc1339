//! Domain values for repositories and mutation requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Repository owner as reported by the server. Immutable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Owner login (user or organization).
    pub login: String,
    /// Avatar URL, when the server provides one.
    pub avatar_url: Option<String>,
}

/// A repository as reported by the server.
///
/// Instances are created from server responses and replaced wholesale on
/// every successful fetch or mutation; nothing mutates one in place. A
/// nullable description on the wire is represented as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    /// Repository name.
    pub name: String,
    /// Repository description (may be empty).
    pub description: String,
    /// Primary programming language.
    pub language: Option<String>,
    /// Repository owner.
    pub owner: Owner,
}

impl Repo {
    /// Identity key for this repository.
    #[must_use]
    pub fn key(&self) -> RepoKey {
        RepoKey::new(&self.owner.login, &self.name)
    }

    /// Get the full name (owner/name).
    #[inline]
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

/// Identity key for a repository: owner login plus repository name.
///
/// This is the key mutations are serialized on; the server assigns it, the
/// client never invents one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoKey {
    pub owner: String,
    pub name: String,
}

impl RepoKey {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The subset of repository fields the server accepts for create/update.
///
/// Serialized as-is into POST/PATCH bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRequest {
    pub name: String,
    pub description: String,
}

impl RepoRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Client-side validation, applied before any network call is issued.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(ValidationError::NameContainsWhitespace);
        }
        Ok(())
    }
}

/// A request rejected client-side before reaching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("repository name is required")]
    EmptyName,

    #[error("repository name must not contain whitespace")]
    NameContainsWhitespace,
}

impl ValidationError {
    /// The fixed user-facing message for this rejection.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyName => "El nombre del repositorio es requerido",
            Self::NameContainsWhitespace => {
                "El nombre del repositorio no puede contener espacios"
            }
        }
    }
}
