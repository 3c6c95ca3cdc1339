//! Command handlers.

pub(crate) mod meta;
pub(crate) mod repos;

use std::sync::Arc;

use warden::github::GithubClient;
use warden::sync::{ListSyncController, MutationCoordinator};
use warden::RepoClient;

use crate::config::Config;

/// Shared wiring for repository commands: one client, one list controller,
/// one mutation coordinator per invocation.
pub(crate) struct Session {
    pub list: Arc<ListSyncController>,
    pub mutations: MutationCoordinator,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let token = config.github_token().ok_or(
            "No GitHub token configured. Set WARDEN_GITHUB_TOKEN or add [github].token \
             to the config file.",
        )?;

        let client: Arc<dyn RepoClient> =
            Arc::new(GithubClient::new(&config.github_host(), &token)?);
        let list = Arc::new(ListSyncController::new(client.clone()));
        let mutations = MutationCoordinator::new(client, list.clone());

        Ok(Self { list, mutations })
    }
}
