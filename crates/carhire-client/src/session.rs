//! Client session state and the bootstrap state machine
//!
//! ```text
//! NotReady --setup--> Pending --alias ok--> Ready
//!                        |
//!                        +--alias error--> Failed
//! ```
//!
//! Every `setup` call starts a new generation. A bootstrap completion is
//! only applied if its generation is still current, so a slow earlier
//! setup can never overwrite the outcome of a later one.

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{info, warn};

/// Readiness of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClientStatus {
    /// `setup` has not been called
    #[default]
    NotReady,
    /// Bootstrap request in flight
    Pending,
    /// Requests may be performed
    Ready,
    /// Bootstrap failed; call `setup` again
    Failed,
}

impl ClientStatus {
    /// Whether bootstrap has finished, successfully or not
    pub fn is_terminal(self) -> bool {
        matches!(self, ClientStatus::Ready | ClientStatus::Failed)
    }
}

/// Point in time copy of the session
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub status: ClientStatus,
    /// Full Authorization header value
    pub auth_token: Option<String>,
    pub domain: Option<String>,
    pub alias: Option<String>,
    pub generation: u64,
}

pub(crate) struct SessionState {
    inner: RwLock<SessionSnapshot>,
    status_tx: watch::Sender<ClientStatus>,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        let (status_tx, _) = watch::channel(ClientStatus::NotReady);
        Self {
            inner: RwLock::new(SessionSnapshot::default()),
            status_tx,
        }
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        self.inner.read().clone()
    }

    pub(crate) fn status(&self) -> ClientStatus {
        self.inner.read().status
    }

    pub(crate) fn alias(&self) -> Option<String> {
        self.inner.read().alias.clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ClientStatus> {
        self.status_tx.subscribe()
    }

    /// Store credentials and move to Pending, returning the new generation
    pub(crate) fn begin_setup(&self, sdk_key: &str, domain: &str) -> u64 {
        let mut inner = self.inner.write();
        inner.generation += 1;
        inner.auth_token = Some(format!("Basic {}", sdk_key));
        inner.domain = Some(domain.to_string());
        inner.alias = None;
        inner.status = ClientStatus::Pending;
        self.status_tx.send_replace(ClientStatus::Pending);
        inner.generation
    }

    /// Apply a bootstrap outcome
    ///
    /// Returns `false` and leaves the session untouched when a newer setup
    /// has started since `generation`.
    pub(crate) fn complete_setup(&self, generation: u64, alias: Option<String>) -> bool {
        let mut inner = self.inner.write();
        if inner.generation != generation {
            warn!(
                generation,
                current = inner.generation,
                "Discarding stale setup completion"
            );
            return false;
        }

        inner.status = if alias.is_some() {
            ClientStatus::Ready
        } else {
            ClientStatus::Failed
        };
        inner.alias = alias;
        info!(status = ?inner.status, "Client setup finished");
        self.status_tx.send_replace(inner.status);
        true
    }
}
