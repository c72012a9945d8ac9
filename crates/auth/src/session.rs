use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::claims::TokenClaims;
use crate::store::{MemoryTokenStore, StoreError, TokenStore};
use crate::Role;

/// The one global session of a client: the current bearer token plus the
/// facts derived from its claims.
///
/// Share it behind an `Arc`; every front-end piece (guards, interceptor,
/// views) reads the same instance. Concurrent logouts are last-write-wins.
pub struct Session {
    store: Box<dyn TokenStore>,
    current: watch::Sender<Option<String>>,
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.current.borrow().is_some())
            .finish()
    }
}

impl Session {
    /// Open a session over `store`, picking up a token persisted earlier.
    pub fn new(store: impl TokenStore + 'static) -> Self {
        let initial = store.load();
        let (current, _) = watch::channel(initial);
        Self {
            store: Box::new(store),
            current,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    /// Claims of the current token, if there is one and it decodes.
    pub fn claims(&self) -> Option<TokenClaims> {
        let token = self.token()?;
        match TokenClaims::decode(&token) {
            Ok(claims) => Some(claims),
            Err(err) => {
                tracing::debug!("stored token does not decode: {err}");
                None
            }
        }
    }

    /// Persist a freshly issued token and notify subscribers.
    pub fn login(&self, token: impl Into<String>) -> Result<(), StoreError> {
        let token = token.into();
        self.store.save(&token)?;
        self.current.send_replace(Some(token));
        tracing::info!("session started");
        Ok(())
    }

    /// Drop the token. Subscribers are notified only if a token was present.
    pub fn logout(&self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!("failed to clear persisted token: {err}");
        }
        let cleared = self.current.send_if_modified(|token| token.take().is_some());
        if cleared {
            tracing::info!("session cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    /// True iff a token is present, decodes, and has not expired at `now`.
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.claims().is_some_and(|claims| !claims.is_expired_at(now))
    }

    /// Empty when signed out; `"User"` when the token names nobody.
    pub fn user_name(&self) -> String {
        if self.current.borrow().is_none() {
            return String::new();
        }
        self.claims()
            .map(|claims| claims.display_name().to_string())
            .unwrap_or_else(|| "User".to_string())
    }

    pub fn roles(&self) -> Vec<Role> {
        self.claims().map(|c| c.role_list()).unwrap_or_default()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles().iter().any(|r| r == role)
    }

    /// Receiver that observes every login/logout.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.current.subscribe()
    }
}
