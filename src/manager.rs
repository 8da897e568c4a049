//! Event orchestration.
//!
//! One [`CookieManager`] per browser instance. The host's event bus feeds
//! raw event payloads into the `on_*` handlers; each handler runs to
//! completion before the next event is processed.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::{ConfigError, StoreError};
use crate::event::{CookieKey, CookieTuple};
use crate::policy::AcceptPolicy;
use crate::relay::{PeerHandle, PeerRegistry, Router};
use crate::store::CookieStore;

pub struct CookieManager {
    policy: AcceptPolicy,
    session: Box<dyn CookieStore>,
    persistent: Box<dyn CookieStore>,
    router: Router,
    origin: Arc<dyn PeerHandle>,
}

impl CookieManager {
    /// Build a manager around explicit store instances. Injecting stores
    /// directly keeps tests honest and avoids hidden global state.
    pub fn new(
        session: Box<dyn CookieStore>,
        persistent: Box<dyn CookieStore>,
        registry: Arc<dyn PeerRegistry>,
        origin: Arc<dyn PeerHandle>,
    ) -> Self {
        Self {
            policy: AcceptPolicy::new(),
            session,
            persistent,
            router: Router::new(registry),
            origin,
        }
    }

    /// Build a manager with stores constructed from `settings`.
    pub fn from_settings(
        settings: &Settings,
        registry: Arc<dyn PeerRegistry>,
        origin: Arc<dyn PeerHandle>,
    ) -> Self {
        let (session, persistent) = settings.build();
        Self::new(session, persistent, registry, origin)
    }

    fn store_for(&mut self, session: bool) -> &mut dyn CookieStore {
        if session {
            self.session.as_mut()
        } else {
            self.persistent.as_mut()
        }
    }

    /// Handle an inbound `add_cookie` event.
    ///
    /// An accepted cookie is relayed to all siblings and inserted into the
    /// store its expiry selects. A rejected cookie is not stored; instead a
    /// `delete_cookie` for the same cookie is sent back to the originating
    /// instance only, so it discards its local copy.
    pub fn on_add_cookie(&mut self, raw: &str) -> Result<(), StoreError> {
        let cookie = CookieTuple::parse(raw)?;
        if self.policy.accept(&cookie) {
            self.router.broadcast_add(raw);
            let session = cookie.expires_with_session();
            self.store_for(session).add_cookie(raw, &cookie)
        } else {
            tracing::debug!(cookie = raw, "cookie rejected by policy");
            if let Err(e) = self.origin.send(&format!("delete_cookie {}", raw)) {
                tracing::warn!(error = %e, "failed to bounce rejection to originator");
            }
            Ok(())
        }
    }

    /// Handle an inbound `delete_cookie` event.
    ///
    /// The deletion is relayed to siblings unconditionally. A full 6-field
    /// key deletes from the store its expiry selects; a shorter key is too
    /// partial to know which store owns the cookie, so both stores are
    /// cleared of matching entries.
    pub fn on_delete_cookie(&mut self, raw: &str) -> Result<(), StoreError> {
        let key = CookieKey::parse(raw)?;
        self.router.broadcast_delete(raw);
        if key.is_full() {
            let session = key.expires_with_session();
            self.store_for(session).delete_cookie(&key)
        } else {
            self.session.delete_cookie(&key)?;
            self.persistent.delete_cookie(&key)
        }
    }

    /// Append a matcher to the whitelist. Existing matchers are never
    /// replaced or removed.
    pub fn on_whitelist(&mut self, directive: &str) -> Result<(), ConfigError> {
        self.policy.allow(directive)
    }

    /// Append a matcher to the blacklist.
    pub fn on_blacklist(&mut self, directive: &str) -> Result<(), ConfigError> {
        self.policy.deny(directive)
    }
}
