//! Client-side task synchronization and view-state layer.
//!
//! Maintains a live, locally-cached mirror of one user's tasks against a
//! remote document store, mediates all mutations through that cache, and
//! derives filtered/searched views for presentation.
//!
//! # Consistency contract
//!
//! Writes are write-through with no optimistic local apply: a mutation goes
//! to the remote store and becomes visible only when the identity-scoped
//! subscription delivers the updated snapshot back. Presentation therefore
//! never observes a state mixing a local edit with a stale remote value.
//! The cost is that a mutation shows up only after the subscription
//! round-trip completes. That is deliberate, not an oversight.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod gateway;
pub mod models;
pub mod remote;
pub mod runtime;
pub mod session;
pub mod store;
pub mod tracing_setup;

pub use config::CoreConfig;
pub use error::CoreError;
pub use events::{CoreEvent, WriteOp};
pub use models::{Credentials, Identity, Task, TaskDraft, TaskPatch, TaskStatus};
pub use remote::{DocumentStore, IdentityProvider, MemoryStore};
pub use runtime::SyncRuntime;
pub use session::Session;
pub use store::{StatusFilter, Subscription, TaskCache, TaskCounts, TaskSnapshot};
