//! Remote document store seam.
//!
//! The store is an opaque external service: the sync core only needs an
//! owner-scoped live watch plus three write calls. Concrete backends (and
//! the in-process [`crate::remote::MemoryStore`]) implement this trait.

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::mpsc;

use crate::error::CoreError;
use crate::models::{Task, TaskPatch};

/// One push from the change feed: either a full owner-scoped snapshot or a
/// sync failure. Snapshots are always complete collections, never deltas.
pub type Delivery = Result<Vec<Task>, CoreError>;

/// Sending half of a task feed, held by store implementations.
pub type DeliverySender = mpsc::UnboundedSender<Delivery>;

/// Live handle over an owner-scoped watch. Emits a full snapshot whenever
/// any matching record is added, changed or removed; may fire many times per
/// second under heavy concurrent writes.
pub struct TaskFeed {
    rx: mpsc::UnboundedReceiver<Delivery>,
}

impl TaskFeed {
    pub fn channel() -> (DeliverySender, TaskFeed) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, TaskFeed { rx })
    }

    /// Next delivery, or `None` once the remote side hung up.
    pub async fn next(&mut self) -> Option<Delivery> {
        self.rx.recv().await
    }

    /// Non-blocking variant for poll-driven callers.
    pub fn poll(&mut self) -> Option<Delivery> {
        self.rx.recv().now_or_never().flatten()
    }
}

/// The remote document store.
///
/// Every call names the collection it operates on; the sync core only ever
/// passes [`crate::constants::TASKS_COLLECTION`]. All calls are async and
/// may fail with a transport or service error; write rejections surface as
/// [`CoreError::Write`], feed failures as [`CoreError::Sync`] deliveries.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Begin a live watch over the owner's records in the collection. The
    /// feed's first delivery is the current collection state.
    fn watch(&self, collection: &str, owner_id: &str) -> TaskFeed;

    /// Insert a record and return its store-assigned id.
    async fn insert(&self, collection: &str, record: Task) -> Result<String, CoreError>;

    /// Write the populated patch fields to the record with the given id.
    async fn update(&self, collection: &str, id: &str, patch: TaskPatch)
        -> Result<(), CoreError>;

    /// Delete the record with the given id.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), CoreError>;
}
