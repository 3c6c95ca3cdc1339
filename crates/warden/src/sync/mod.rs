//! Resource-list synchronization and mutation coordination.
//!
//! # Module Structure
//!
//! - [`list`] - `ListState` and `ListSyncController`: the authoritative
//!   in-memory repository list, its loading state, and refresh ordering
//! - [`mutation`] - `MutationCoordinator`: create/update/delete with
//!   per-repository mutual exclusion

pub mod list;
pub mod mutation;

pub use list::{ListState, ListSyncController};
pub use mutation::MutationCoordinator;
