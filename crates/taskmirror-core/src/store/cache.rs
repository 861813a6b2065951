//! Task cache: the canonical in-memory mirror of the active identity's
//! tasks.
//!
//! The cache owns a single [`TaskSnapshot`] and keeps it consistent with the
//! remote store through an identity-scoped live subscription. Mutations are
//! strictly write-through: they go to the remote store and the local
//! snapshot is only updated when the subscription delivers the authoritative
//! result back. There is no optimistic local apply, so presentation reflects
//! a mutation only after the round-trip completes; that is the consistency
//! contract, not a latency bug to fix.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::constants::TASKS_COLLECTION;
use crate::error::CoreError;
use crate::events::CoreEvent;
use crate::models::{Task, TaskDraft, TaskPatch, TaskStatus};
use crate::remote::DocumentStore;
use crate::store::snapshot::{StatusFilter, TaskSnapshot};

/// Handle over one live watch. Disposing stops the watch; disposing twice is
/// a no-op, and a delivery that arrives after disposal never mutates the
/// snapshot. The cache keeps no record of handles it has issued: owning the
/// single active subscription and disposing it before resubscribing is the
/// caller's job (the runtime does this on every identity change).
pub struct Subscription {
    alive: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    fn live(alive: Arc<AtomicBool>, task: JoinHandle<()>) -> Self {
        Self {
            alive,
            task: Some(task),
        }
    }

    /// An already-disposed handle, returned when there is nothing to watch.
    pub fn inert() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Stop the watch. Idempotent.
    pub fn dispose(&mut self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            debug!("subscription disposed");
            if let Some(task) = self.task.take() {
                task.abort();
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Reactive task store, the single source of truth for the task list.
pub struct TaskCache<S: DocumentStore> {
    store: Arc<S>,
    state: Arc<Mutex<TaskSnapshot>>,
    events: UnboundedSender<CoreEvent>,
}

impl<S: DocumentStore> TaskCache<S> {
    pub fn new(store: Arc<S>, events: UnboundedSender<CoreEvent>) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(TaskSnapshot::default())),
            events,
        }
    }

    /// Begin a live, identity-scoped watch over the remote store.
    ///
    /// An empty `identity_id` yields an inert handle without touching state,
    /// so calling before authentication resolves is harmless. Otherwise
    /// `loading` is set immediately and each delivery replaces the task set
    /// atomically. A failed delivery clears `loading`, surfaces a
    /// [`CoreEvent::SyncFailed`] and stops the feed; there is no automatic
    /// retry, the caller must resubscribe.
    pub fn subscribe(&self, identity_id: &str) -> Subscription {
        if identity_id.is_empty() {
            debug!("subscribe called without an identity, returning inert handle");
            return Subscription::inert();
        }

        info!(identity = identity_id, "starting task subscription");
        self.state.lock().loading = true;

        let mut feed = self.store.watch(TASKS_COLLECTION, identity_id);
        let alive = Arc::new(AtomicBool::new(true));
        let guard = alive.clone();
        let state = self.state.clone();
        let events = self.events.clone();
        let owner = identity_id.to_string();

        let task = tokio::spawn(async move {
            loop {
                let Some(delivery) = feed.next().await else {
                    // The store dropped the feed without delivering an
                    // error. Treat it like a failed delivery so the caller
                    // is not stuck on a loading indicator forever.
                    if guard.load(Ordering::SeqCst) {
                        state.lock().loading = false;
                        warn!("task feed closed by the store");
                        let _ = events.send(CoreEvent::SyncFailed {
                            message: "task feed closed by the store".to_string(),
                        });
                    }
                    break;
                };
                match delivery {
                    Ok(records) => {
                        // Tasks belonging to other identities are never
                        // retained, even if the feed misbehaves.
                        let tasks: Vec<Task> = records
                            .into_iter()
                            .filter(|t| t.owner_id == owner)
                            .collect();
                        let count = tasks.len();
                        {
                            let mut snap = state.lock();
                            // Check under the lock so a disposal that raced
                            // the delivery wins.
                            if !guard.load(Ordering::SeqCst) {
                                break;
                            }
                            snap.tasks = tasks;
                            snap.loading = false;
                        }
                        debug!(count, "applied task snapshot");
                        let _ = events.send(CoreEvent::TasksUpdated { count });
                    }
                    Err(err) => {
                        if !guard.load(Ordering::SeqCst) {
                            break;
                        }
                        // Keep the stale snapshot; stale-but-available beats
                        // empty. The caller must resubscribe.
                        state.lock().loading = false;
                        warn!("task feed delivery failed: {err}");
                        let _ = events.send(CoreEvent::SyncFailed {
                            message: err.to_string(),
                        });
                        break;
                    }
                }
            }
        });

        Subscription::live(alive, task)
    }

    /// Create a task for the given identity. Stamps `owner_id`,
    /// `status = pending` and both timestamps, then writes through; the
    /// snapshot is untouched until the subscription observes the new record.
    pub async fn create(
        &self,
        draft: TaskDraft,
        identity_id: &str,
    ) -> Result<String, CoreError> {
        if identity_id.is_empty() {
            return Err(CoreError::NotAuthenticated);
        }
        let now = Utc::now();
        let record = Task {
            id: String::new(),
            owner_id: identity_id.to_string(),
            name: draft.name,
            description: draft.description,
            deadline: draft.deadline,
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        let id = self.store.insert(TASKS_COLLECTION, record).await?;
        info!(%id, "task created");
        Ok(id)
    }

    /// Write the given field subset plus a refreshed `updated_at`.
    pub async fn update(&self, task_id: &str, mut patch: TaskPatch) -> Result<(), CoreError> {
        patch.updated_at = Some(Utc::now());
        self.store.update(TASKS_COLLECTION, task_id, patch).await?;
        debug!(id = task_id, "task updated");
        Ok(())
    }

    /// Delete the remote record by id.
    pub async fn remove(&self, task_id: &str) -> Result<(), CoreError> {
        self.store.delete(TASKS_COLLECTION, task_id).await?;
        info!(id = task_id, "task deleted");
        Ok(())
    }

    /// Flip `pending <-> completed`. The one place status transition logic
    /// lives.
    pub async fn toggle_status(
        &self,
        task_id: &str,
        current_status: TaskStatus,
    ) -> Result<(), CoreError> {
        self.update(task_id, TaskPatch::status(current_status.toggled()))
            .await
    }

    // Snapshot access. Getters clone so the lock is never held by callers.

    pub fn snapshot(&self) -> TaskSnapshot {
        self.state.lock().clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().tasks.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.lock().loading = loading;
    }

    pub fn filter(&self) -> StatusFilter {
        self.state.lock().filter
    }

    pub fn set_filter(&self, filter: StatusFilter) {
        self.state.lock().filter = filter;
    }

    pub fn search_term(&self) -> String {
        self.state.lock().search_term.clone()
    }

    pub fn set_search(&self, term: impl Into<String>) {
        self.state.lock().search_term = term.into();
    }

    /// Drop all local state, e.g. on logout. Remote records are untouched.
    pub fn clear(&self) {
        let mut snap = self.state.lock();
        *snap = TaskSnapshot::default();
    }
}
