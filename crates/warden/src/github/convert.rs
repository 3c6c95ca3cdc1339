//! Conversion from GitHub wire types to domain values.

use crate::model::{Owner, Repo};

use super::types::GithubRepo;

/// Convert a GitHub repository payload to the domain model.
///
/// A null description is treated as empty.
pub fn to_repo(repo: GithubRepo) -> Repo {
    Repo {
        name: repo.name,
        description: repo.description.unwrap_or_default(),
        language: repo.language,
        owner: Owner {
            login: repo.owner.login,
            avatar_url: repo.owner.avatar_url,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GithubOwner;

    #[test]
    fn maps_fields_and_defaults_null_description() {
        let repo = to_repo(GithubRepo {
            name: "widget".to_string(),
            description: None,
            language: Some("Rust".to_string()),
            owner: GithubOwner {
                login: "acme".to_string(),
                avatar_url: None,
            },
        });

        assert_eq!(repo.name, "widget");
        assert_eq!(repo.description, "");
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.owner.login, "acme");
        assert_eq!(repo.full_name(), "acme/widget");
    }
}
