use thiserror::Error;

/// Error taxonomy of the sync core. Every error is scoped to the operation
/// that raised it; none is fatal to the process, and none triggers an
/// automatic retry.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// The identity provider rejected the credentials or the session.
    /// The session is left cleared.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// A subscription delivery failed (transport drop, permission
    /// revocation). The snapshot keeps its last-known value; the caller
    /// must resubscribe.
    #[error("subscription delivery failed: {message}")]
    Sync { message: String },

    /// The remote store rejected a create/update/delete. The local snapshot
    /// is unchanged since writes never apply optimistically.
    #[error("write rejected: {message}")]
    Write { message: String },

    /// A mutation was attempted without an active identity.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl CoreError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn sync(message: impl Into<String>) -> Self {
        Self::Sync {
            message: message.into(),
        }
    }

    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}
