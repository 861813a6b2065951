//! Runtime facade wiring session, cache, gateway and the remote seams
//! together, and owning the one active subscription.
//!
//! The dispose-before-resubscribe ordering lives here: on every identity
//! change the previous watch is disposed before a new one starts, so a
//! stale-identity feed can never overwrite the snapshot for a newly active
//! identity.

use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::events::CoreEvent;
use crate::gateway::MutationGateway;
use crate::models::{Credentials, Identity, Task, TaskDraft, TaskPatch, TaskStatus};
use crate::remote::{DocumentStore, IdentityFeed, IdentityProvider};
use crate::session::Session;
use crate::store::views::{self, TaskCounts};
use crate::store::{StatusFilter, Subscription, TaskCache};

pub struct SyncRuntime<S: DocumentStore, P: IdentityProvider> {
    session: Session,
    cache: Arc<TaskCache<S>>,
    gateway: MutationGateway<S>,
    provider: Arc<P>,
    subscription: Subscription,
    events_tx: UnboundedSender<CoreEvent>,
    events_rx: Option<UnboundedReceiver<CoreEvent>>,
}

impl<S: DocumentStore, P: IdentityProvider> SyncRuntime<S, P> {
    /// Build a runtime over the injected remote seams. Must be called from
    /// within a tokio runtime; subscriptions spawn onto it.
    pub fn new(
        config: CoreConfig,
        store: Arc<S>,
        provider: Arc<P>,
    ) -> std::io::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let session = Session::with_storage(&config.data_dir);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let cache = Arc::new(TaskCache::new(store, events_tx.clone()));
        let gateway = MutationGateway::new(cache.clone(), events_tx.clone());

        Ok(Self {
            session,
            cache,
            gateway,
            provider,
            subscription: Subscription::inert(),
            events_tx,
            events_rx: Some(events_rx),
        })
    }

    /// Resubscribe for a session persisted from a previous run, if any.
    pub fn resume(&mut self) {
        if let Some(identity) = self.session.current().cloned() {
            info!(identity = %identity.id, "resuming persisted session");
            self.resubscribe(&identity.id);
        }
    }

    // Identity lifecycle

    pub async fn sign_in(&mut self, credentials: Credentials) -> Result<Identity, CoreError> {
        match self.provider.authenticate(&credentials).await {
            Ok(identity) => {
                self.apply_identity_change(Some(identity.clone()));
                Ok(identity)
            }
            Err(err) => {
                // Never retried automatically; the session is left cleared.
                warn!("authentication failed: {err}");
                self.apply_identity_change(None);
                Err(err)
            }
        }
    }

    pub async fn sign_out(&mut self) -> Result<(), CoreError> {
        self.provider.sign_out().await?;
        self.apply_identity_change(None);
        Ok(())
    }

    /// Apply a provider-side identity change (sign-in/out callback or a
    /// verification-flag update). Always disposes the previous watch first.
    pub fn apply_identity_change(&mut self, identity: Option<Identity>) {
        self.subscription.dispose();
        match &identity {
            Some(id) => self.resubscribe(&id.id),
            None => self.cache.clear(),
        }
        self.session.set_identity(identity.clone());
        let _ = self.events_tx.send(CoreEvent::IdentityChanged { identity });
    }

    fn resubscribe(&mut self, identity_id: &str) {
        self.subscription.dispose();
        // The previous identity's tasks must not be readable while the new
        // feed's first delivery is in flight.
        self.cache.clear();
        self.subscription = self.cache.subscribe(identity_id);
    }

    /// The provider's change feed; pump it into
    /// [`Self::apply_identity_change`] from the driving loop.
    pub fn identity_changes(&self) -> IdentityFeed {
        self.provider.changes()
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.session.current()
    }

    // Reads

    pub fn get_tasks(&self) -> Vec<Task> {
        self.cache.tasks()
    }

    pub fn get_filtered_searched(&self, filter: StatusFilter, term: &str) -> Vec<Task> {
        views::project(&self.cache.tasks(), filter, term)
    }

    /// Projection using the selectors stored on the snapshot.
    pub fn visible_tasks(&self) -> Vec<Task> {
        let snap = self.cache.snapshot();
        views::project(&snap.tasks, snap.filter, &snap.search_term)
    }

    pub fn is_loading(&self) -> bool {
        self.cache.is_loading()
    }

    pub fn task_counts(&self) -> TaskCounts {
        views::task_counts(&self.cache.tasks())
    }

    pub fn overdue_count(&self) -> usize {
        views::overdue_count(&self.cache.tasks(), Utc::now())
    }

    pub fn set_filter(&self, filter: StatusFilter) {
        self.cache.set_filter(filter);
    }

    pub fn set_search(&self, term: impl Into<String>) {
        self.cache.set_search(term);
    }

    // Writes, all through the gateway

    pub async fn add_task(&self, draft: TaskDraft) -> Result<String, CoreError> {
        let identity_id = self
            .session
            .current()
            .map(|i| i.id.clone())
            .ok_or(CoreError::NotAuthenticated)?;
        self.gateway.add_task(draft, &identity_id).await
    }

    pub async fn edit_task(&self, task_id: &str, patch: TaskPatch) -> Result<(), CoreError> {
        self.gateway.edit_task(task_id, patch).await
    }

    pub async fn remove_task(&self, task_id: &str) -> Result<(), CoreError> {
        self.gateway.remove_task(task_id).await
    }

    pub async fn toggle_status(
        &self,
        task_id: &str,
        current_status: TaskStatus,
    ) -> Result<(), CoreError> {
        self.gateway.toggle_status(task_id, current_status).await
    }

    // Event channel

    /// Hand the event receiver to the presentation loop. Subsequent
    /// `next_event`/`poll_event` calls on the runtime return nothing.
    pub fn take_events(&mut self) -> Option<UnboundedReceiver<CoreEvent>> {
        self.events_rx.take()
    }

    pub async fn next_event(&mut self) -> Option<CoreEvent> {
        match &mut self.events_rx {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    pub fn poll_event(&mut self) -> Option<CoreEvent> {
        match &mut self.events_rx {
            Some(rx) => rx.recv().now_or_never().flatten(),
            None => None,
        }
    }
}
