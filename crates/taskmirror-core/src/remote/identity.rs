//! Identity provider seam.
//!
//! Sign-up, sign-in and email verification live entirely inside the
//! provider; the sync core only consumes the resulting identity and its
//! change notifications.

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::mpsc;

use crate::error::CoreError;
use crate::models::{Credentials, Identity};

/// Stream of identity changes: fires with the new value whenever sign-in or
/// sign-out happens, or the verification flag flips.
pub struct IdentityFeed {
    rx: mpsc::UnboundedReceiver<Option<Identity>>,
}

impl IdentityFeed {
    pub fn channel() -> (mpsc::UnboundedSender<Option<Identity>>, IdentityFeed) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, IdentityFeed { rx })
    }

    pub async fn next(&mut self) -> Option<Option<Identity>> {
        self.rx.recv().await
    }

    pub fn poll(&mut self) -> Option<Option<Identity>> {
        self.rx.recv().now_or_never().flatten()
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate with credentials. Rejection surfaces as
    /// [`CoreError::Auth`]; the caller leaves the session cleared and never
    /// retries automatically.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, CoreError>;

    /// The provider's present view of the signed-in identity, if any.
    fn current_identity(&self) -> Option<Identity>;

    async fn sign_out(&self) -> Result<(), CoreError>;

    /// Change-notification stream for sign-in/out and verification changes.
    fn changes(&self) -> IdentityFeed;
}
