//! The authoritative in-memory repository list and its loading state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::client::RepoClient;
use crate::error::{ErrorKind, classify};
use crate::model::Repo;

/// Loading state of the repository list.
///
/// Exactly one variant holds at a time. `Loaded` with zero items means the
/// server reported an empty collection; consumers render that as "nothing
/// found", not as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded(Vec<Repo>),
    Failed(ErrorKind),
}

impl ListState {
    /// The items of a `Loaded` state; empty otherwise.
    #[must_use]
    pub fn items(&self) -> &[Repo] {
        match self {
            Self::Loaded(items) => items,
            _ => &[],
        }
    }
}

/// Owns the authoritative in-memory list and orchestrates fetches.
///
/// Refreshes follow a last-issued-wins contract: every `refresh` bumps a
/// generation counter, and a fetch completion is applied only if its
/// generation is still current when it arrives. A superseded fetch's
/// result is discarded, never merged, regardless of arrival order.
///
/// State transitions happen under a mutex that is never held across an
/// await, so the controller stays correct if callers run it from parallel
/// tasks.
pub struct ListSyncController {
    client: Arc<dyn RepoClient>,
    state: Mutex<ListState>,
    generation: AtomicU64,
}

impl ListSyncController {
    pub fn new(client: Arc<dyn RepoClient>) -> Self {
        Self {
            client,
            state: Mutex::new(ListState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch the list and update the state.
    ///
    /// Always issues a new network call; there is no debouncing. Returns
    /// the state as this call left it: the fetched result, or the current
    /// state unchanged when a newer refresh superseded this one while it
    /// was in flight.
    pub async fn refresh(&self) -> ListState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.lock_state() = ListState::Loading;

        let result = self.client.list().await;

        let mut state = self.lock_state();
        if generation != self.generation.load(Ordering::SeqCst) {
            tracing::debug!(generation, "discarding superseded fetch result");
            return state.clone();
        }

        *state = match result {
            Ok(items) => ListState::Loaded(items),
            Err(outcome) => ListState::Failed(classify(&outcome)),
        };
        state.clone()
    }

    /// Current state, without blocking on any in-flight fetch.
    #[must_use]
    pub fn state(&self) -> ListState {
        self.lock_state().clone()
    }

    /// Current items; empty unless the list is in a `Loaded` state.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Repo> {
        self.lock_state().items().to_vec()
    }

    /// Return to `Idle` and invalidate any in-flight fetch.
    ///
    /// Called when the owning session ends. A fetch completing afterwards
    /// finds its generation stale and is discarded.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.lock_state() = ListState::Idle;
    }

    fn lock_state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().expect("list state lock poisoned")
    }
}
