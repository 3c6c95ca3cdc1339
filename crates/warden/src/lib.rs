//! Warden - a GitHub repository manager.
//!
//! This library owns the resource-list synchronization and
//! mutation-coordination core: [`ListSyncController`] holds the
//! authoritative in-memory repository list and its loading state, and
//! [`MutationCoordinator`] applies create/update/delete mutations while
//! preventing redundant concurrent operations on the same repository.
//! [`GithubClient`] is the transport-backed client both depend on through
//! the [`RepoClient`] seam, so tests (and other front ends) can inject
//! their own.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use warden::github::{GITHUB_HOST, GithubClient};
//! use warden::{ListSyncController, MutationCoordinator, RepoClient, RepoRequest};
//!
//! let client: Arc<dyn RepoClient> = Arc::new(GithubClient::new(GITHUB_HOST, &token)?);
//! let list = Arc::new(ListSyncController::new(client.clone()));
//! let mutations = MutationCoordinator::new(client, list.clone());
//!
//! let state = list.refresh().await;
//! mutations.submit_create(RepoRequest::new("tooling", "Internal tooling")).await?;
//! ```

pub mod client;
pub mod error;
pub mod github;
pub mod http;
pub mod model;
pub mod sync;

pub use client::RepoClient;
pub use error::{ErrorKind, MutationError, TransportError, classify};
pub use github::GithubClient;
pub use model::{Owner, Repo, RepoKey, RepoRequest, ValidationError};
pub use sync::{ListState, ListSyncController, MutationCoordinator};
