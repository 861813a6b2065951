//! Session context: holds the active identity and nothing else.
//!
//! Written only from identity-provider callbacks (via the runtime), read by
//! the task cache to decide subscription scope. State only, no I/O beyond
//! best-effort persistence of the signed-in identity across restarts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::SESSION_FILE;
use crate::models::Identity;

/// An explicitly owned session container. Construct one per logical session;
/// there is no process-wide singleton, so independent sessions can be tested
/// in isolation.
pub struct Session {
    identity: Option<Identity>,
    /// When set, identity changes are mirrored to `<data_dir>/session.json`.
    path: Option<PathBuf>,
}

impl Session {
    /// In-memory session with no persistence.
    pub fn new() -> Self {
        Self {
            identity: None,
            path: None,
        }
    }

    /// Session backed by a JSON file under `data_dir`; a previously persisted
    /// identity is restored on construction.
    pub fn with_storage(data_dir: &Path) -> Self {
        let path = data_dir.join(SESSION_FILE);
        let identity = Self::load_from_file(&path);
        if identity.is_some() {
            debug!("restored persisted session");
        }
        Self {
            identity,
            path: Some(path),
        }
    }

    fn load_from_file(path: &PathBuf) -> Option<Identity> {
        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    fn save_to_file(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match &self.identity {
            Some(identity) => {
                if let Ok(json) = serde_json::to_string_pretty(identity) {
                    let _ = fs::write(path, json);
                }
            }
            None => {
                let _ = fs::remove_file(path);
            }
        }
    }

    /// Set or clear the active identity. Dependents must resubscribe after
    /// this changes; the session itself signals nothing.
    pub fn set_identity(&mut self, identity: Option<Identity>) {
        self.identity = identity;
        self.save_to_file();
    }

    pub fn current(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn clear(&mut self) {
        self.set_identity(None);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
