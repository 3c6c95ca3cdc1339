//! Create/update/delete coordination with per-repository mutual exclusion.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::client::RepoClient;
use crate::error::{MutationError, classify};
use crate::model::{Repo, RepoKey, RepoRequest};

use super::list::ListSyncController;

/// Mutations currently in flight.
///
/// The create slot is separate from the key set: a create's identity is
/// assigned by the server, so there is no key to guard until it completes.
#[derive(Default)]
struct PendingMutations {
    create_in_flight: bool,
    keys: HashSet<RepoKey>,
}

/// Which pending slot a mutation occupies.
enum Slot {
    Create,
    Key(RepoKey),
}

/// Releases a pending slot when dropped.
///
/// Dropping runs on every exit path of a submission, success or failure,
/// so a failed call never permanently blocks future mutations on its key.
struct PendingGuard {
    pending: Arc<Mutex<PendingMutations>>,
    slot: Slot,
}

impl PendingGuard {
    fn acquire(
        pending: &Arc<Mutex<PendingMutations>>,
        slot: Slot,
    ) -> Result<Self, MutationError> {
        let mut inner = pending.lock().expect("pending mutations lock poisoned");
        let occupied = match &slot {
            Slot::Create => std::mem::replace(&mut inner.create_in_flight, true),
            Slot::Key(key) => !inner.keys.insert(key.clone()),
        };
        if occupied {
            match &slot {
                Slot::Create => tracing::debug!("rejecting create, one already in flight"),
                Slot::Key(key) => {
                    tracing::debug!(%key, "rejecting mutation, key already in flight");
                }
            }
            return Err(MutationError::AlreadyInProgress);
        }
        Ok(Self {
            pending: Arc::clone(pending),
            slot,
        })
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut inner = self
            .pending
            .lock()
            .expect("pending mutations lock poisoned");
        match &self.slot {
            Slot::Create => inner.create_in_flight = false,
            Slot::Key(key) => {
                inner.keys.remove(key);
            }
        }
    }
}

/// Coordinates create/update/delete against single repositories.
///
/// At most one mutation is in flight per identity key (and at most one
/// create, whose key the server has not assigned yet); a colliding
/// submission is rejected immediately with `AlreadyInProgress` rather than
/// queued. Different keys proceed concurrently.
///
/// After a successful mutation the list is re-fetched in full rather than
/// patched locally, trading one extra round-trip for agreement with
/// server-assigned fields.
pub struct MutationCoordinator {
    client: Arc<dyn RepoClient>,
    list: Arc<ListSyncController>,
    pending: Arc<Mutex<PendingMutations>>,
}

impl MutationCoordinator {
    pub fn new(client: Arc<dyn RepoClient>, list: Arc<ListSyncController>) -> Self {
        Self {
            client,
            list,
            pending: Arc::new(Mutex::new(PendingMutations::default())),
        }
    }

    /// Create a repository for the authenticated user.
    ///
    /// Validates the request before any network call, then issues the
    /// create unless one is already in flight.
    pub async fn submit_create(&self, req: RepoRequest) -> Result<Repo, MutationError> {
        req.validate()?;
        let guard = PendingGuard::acquire(&self.pending, Slot::Create)?;

        let result = self.client.create(&req).await;
        // The slot frees when the call completes, before any refresh.
        drop(guard);

        match result {
            Ok(repo) => {
                self.list.refresh().await;
                Ok(repo)
            }
            Err(outcome) => Err(MutationError::Remote(classify(&outcome))),
        }
    }

    /// Update the repository identified by `(owner, name)`.
    pub async fn submit_update(
        &self,
        owner: &str,
        name: &str,
        req: RepoRequest,
    ) -> Result<Repo, MutationError> {
        req.validate()?;
        let key = RepoKey::new(owner, name);
        let guard = PendingGuard::acquire(&self.pending, Slot::Key(key))?;

        let result = self.client.update(owner, name, &req).await;
        drop(guard);

        match result {
            Ok(repo) => {
                self.list.refresh().await;
                Ok(repo)
            }
            Err(outcome) => Err(MutationError::Remote(classify(&outcome))),
        }
    }

    /// Delete the repository identified by `(owner, name)`.
    ///
    /// No client-side validation: the identity comes from an existing item.
    pub async fn submit_delete(&self, owner: &str, name: &str) -> Result<(), MutationError> {
        let key = RepoKey::new(owner, name);
        let guard = PendingGuard::acquire(&self.pending, Slot::Key(key))?;

        let result = self.client.delete(owner, name).await;
        drop(guard);

        match result {
            Ok(()) => {
                self.list.refresh().await;
                Ok(())
            }
            Err(outcome) => Err(MutationError::Remote(classify(&outcome))),
        }
    }

    /// Clear all pending state when the owning session ends.
    pub fn reset(&self) {
        let mut inner = self
            .pending
            .lock()
            .expect("pending mutations lock poisoned");
        inner.create_in_flight = false;
        inner.keys.clear();
    }
}
