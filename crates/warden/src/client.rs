//! Client abstraction the synchronization layer depends on.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::model::{Repo, RepoRequest};

/// Trait for clients that expose repository CRUD against a remote API.
///
/// Each operation is a single network round-trip with no internal retry;
/// failures are terminal for the call that raised them. The sync layer
/// depends on this trait rather than a concrete client, so tests (and
/// alternative back ends) can inject their own implementation.
#[async_trait]
pub trait RepoClient: Send + Sync {
    /// Fetch the authenticated user's repositories.
    async fn list(&self) -> Result<Vec<Repo>, TransportError>;

    /// Create a repository for the authenticated user.
    async fn create(&self, req: &RepoRequest) -> Result<Repo, TransportError>;

    /// Update an existing repository's name and description.
    async fn update(
        &self,
        owner: &str,
        name: &str,
        req: &RepoRequest,
    ) -> Result<Repo, TransportError>;

    /// Delete a repository.
    async fn delete(&self, owner: &str, name: &str) -> Result<(), TransportError>;
}
