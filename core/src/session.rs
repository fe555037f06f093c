// farmacart/src/session.rs

//! The authentication context the cart observes.
//!
//! Token persistence belongs to the host (browser storage, keychain); this type only holds
//! the live bearer token and broadcasts the authenticated flag.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::info;

#[derive(Clone)]
pub struct Session {
  inner: Arc<SessionInner>,
}

struct SessionInner {
  token: RwLock<Option<String>>,
  authenticated: watch::Sender<bool>,
}

impl Session {
  pub fn anonymous() -> Self {
    let (authenticated, _) = watch::channel(false);
    Self {
      inner: Arc::new(SessionInner {
        token: RwLock::new(None),
        authenticated,
      }),
    }
  }

  pub fn with_token(token: impl Into<String>) -> Self {
    let session = Self::anonymous();
    session.sign_in(token);
    session
  }

  pub fn sign_in(&self, token: impl Into<String>) {
    *self.inner.token.write() = Some(token.into());
    self.inner.authenticated.send_replace(true);
    info!("Session authenticated.");
  }

  pub fn sign_out(&self) {
    *self.inner.token.write() = None;
    self.inner.authenticated.send_replace(false);
    info!("Session signed out.");
  }

  pub fn is_authenticated(&self) -> bool {
    *self.inner.authenticated.borrow()
  }

  pub fn token(&self) -> Option<String> {
    self.inner.token.read().clone()
  }

  /// Receives every change of the authenticated flag. The current value is marked as seen.
  pub fn subscribe(&self) -> watch::Receiver<bool> {
    self.inner.authenticated.subscribe()
  }
}

impl std::fmt::Debug for Session {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Session")
      .field("authenticated", &self.is_authenticated())
      .field("token", &self.inner.token.read().as_ref().map(|_| "[REDACTED]"))
      .finish()
  }
}
