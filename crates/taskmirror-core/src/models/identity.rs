use serde::{Deserialize, Serialize};

/// The authenticated account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque provider-assigned id; used to scope the task subscription.
    pub id: String,
    pub email: String,
    /// Whether the provider has confirmed the email address. Surfaced to
    /// presentation only; verification never gates the sync layer.
    pub verified: bool,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>, verified: bool) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            verified,
        }
    }
}

/// Sign-in input passed straight through to the identity provider.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}
