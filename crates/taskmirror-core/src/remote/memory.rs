//! In-process document store.
//!
//! A complete [`DocumentStore`] backed by per-collection `HashMap`s, used by
//! tests and local demos. Mirrors the push behavior of a real change feed:
//! every mutation delivers a fresh owner-scoped snapshot to all live watchers
//! of that collection, and a new watch receives the current state immediately.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{Task, TaskPatch};
use crate::remote::store::{DeliverySender, DocumentStore, TaskFeed};

struct Watcher {
    collection: String,
    owner_id: String,
    tx: DeliverySender,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, HashMap<String, Task>>,
    watchers: Vec<Watcher>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all collections and owners. Test convenience.
    pub fn len(&self) -> usize {
        self.inner.lock().collections.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot_for(inner: &Inner, collection: &str, owner_id: &str) -> Vec<Task> {
        inner
            .collections
            .get(collection)
            .map(|records| {
                records
                    .values()
                    .filter(|t| t.owner_id == owner_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Push the owner's current snapshot to every live watcher of the collection.
    fn notify(inner: &mut Inner, collection: &str, owner_id: &str) {
        inner.watchers.retain(|w| !w.tx.is_closed());
        let mut deliveries = Vec::new();
        for watcher in &inner.watchers {
            if watcher.collection == collection && watcher.owner_id == owner_id {
                deliveries.push(watcher.tx.clone());
            }
        }
        let snapshot = Self::snapshot_for(inner, collection, owner_id);
        for tx in deliveries {
            let _ = tx.send(Ok(snapshot.clone()));
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn watch(&self, collection: &str, owner_id: &str) -> TaskFeed {
        let (tx, feed) = TaskFeed::channel();
        let mut inner = self.inner.lock();
        // A fresh watch sees the current state without waiting for a write.
        let _ = tx.send(Ok(Self::snapshot_for(&inner, collection, owner_id)));
        inner.watchers.push(Watcher {
            collection: collection.to_string(),
            owner_id: owner_id.to_string(),
            tx,
        });
        feed
    }

    async fn insert(&self, collection: &str, mut record: Task) -> Result<String, CoreError> {
        let id = Uuid::new_v4().to_string();
        record.id = id.clone();
        let owner_id = record.owner_id.clone();

        let mut inner = self.inner.lock();
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), record);
        debug!(%collection, %id, "memory store: inserted record");
        Self::notify(&mut inner, collection, &owner_id);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: TaskPatch) -> Result<(), CoreError> {
        let mut inner = self.inner.lock();
        let owner_id = match inner
            .collections
            .get_mut(collection)
            .and_then(|records| records.get_mut(id))
        {
            Some(task) => {
                patch.apply(task);
                task.owner_id.clone()
            }
            None => return Err(CoreError::write(format!("no such record: {id}"))),
        };
        Self::notify(&mut inner, collection, &owner_id);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), CoreError> {
        let mut inner = self.inner.lock();
        let Some(task) = inner
            .collections
            .get_mut(collection)
            .and_then(|records| records.remove(id))
        else {
            return Err(CoreError::write(format!("no such record: {id}")));
        };
        Self::notify(&mut inner, collection, &task.owner_id);
        Ok(())
    }
}
