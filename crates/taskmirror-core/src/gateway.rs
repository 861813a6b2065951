//! Mutation gateway: resource-bracketing adapter around the task cache's
//! write operations.
//!
//! Every write is wrapped the same way: `loading` goes up before the call
//! and comes down on every exit path, success or failure, and the outcome is
//! reported uniformly on the event channel. The gateway defines no state of
//! its own.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::error::CoreError;
use crate::events::{CoreEvent, WriteOp};
use crate::models::{TaskDraft, TaskPatch, TaskStatus};
use crate::remote::DocumentStore;
use crate::store::TaskCache;

pub struct MutationGateway<S: DocumentStore> {
    cache: Arc<TaskCache<S>>,
    events: UnboundedSender<CoreEvent>,
}

impl<S: DocumentStore> MutationGateway<S> {
    pub fn new(cache: Arc<TaskCache<S>>, events: UnboundedSender<CoreEvent>) -> Self {
        Self { cache, events }
    }

    pub async fn add_task(
        &self,
        draft: TaskDraft,
        identity_id: &str,
    ) -> Result<String, CoreError> {
        self.bracket(WriteOp::Create, self.cache.create(draft, identity_id))
            .await
    }

    pub async fn edit_task(&self, task_id: &str, patch: TaskPatch) -> Result<(), CoreError> {
        self.bracket(WriteOp::Update, self.cache.update(task_id, patch))
            .await
    }

    pub async fn remove_task(&self, task_id: &str) -> Result<(), CoreError> {
        self.bracket(WriteOp::Delete, self.cache.remove(task_id))
            .await
    }

    pub async fn toggle_status(
        &self,
        task_id: &str,
        current_status: TaskStatus,
    ) -> Result<(), CoreError> {
        self.bracket(
            WriteOp::Update,
            self.cache.toggle_status(task_id, current_status),
        )
        .await
    }

    async fn bracket<T>(
        &self,
        op: WriteOp,
        write: impl Future<Output = Result<T, CoreError>>,
    ) -> Result<T, CoreError> {
        self.cache.set_loading(true);
        let result = write.await;
        // Cleared on every exit path, including failure.
        self.cache.set_loading(false);

        match &result {
            Ok(_) => {
                let _ = self.events.send(CoreEvent::WriteCompleted { op });
            }
            Err(err) => {
                warn!(?op, "write failed: {err}");
                let _ = self.events.send(CoreEvent::WriteFailed {
                    op,
                    message: err.to_string(),
                });
            }
        }
        result
    }
}
