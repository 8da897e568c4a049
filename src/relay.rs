//! Fan-out of cookie events to sibling instances.
//!
//! Discovery and addressing of siblings is the host's job; this module only
//! needs an enumerable set of peer handles with a send capability. Delivery
//! is fire-and-forget: no acknowledgement, no ordering guarantee, and a
//! failed send to one sibling never blocks the rest.

use std::io;
use std::sync::Arc;

/// A handle to one sibling instance.
pub trait PeerHandle {
    /// Deliver one raw event line to the sibling.
    fn send(&self, raw_event: &str) -> io::Result<()>;
}

/// The host-supplied registry of sibling instances.
pub trait PeerRegistry {
    /// All known peers, excluding the instance this registry was built for.
    fn recipients(&self) -> Vec<Arc<dyn PeerHandle>>;
}

/// Broadcasts add/delete cookie events to every sibling.
pub struct Router {
    registry: Arc<dyn PeerRegistry>,
}

impl Router {
    pub fn new(registry: Arc<dyn PeerRegistry>) -> Self {
        Self { registry }
    }

    /// Relay an accepted cookie to all siblings.
    pub fn broadcast_add(&self, raw: &str) {
        self.broadcast("add_cookie", raw);
    }

    /// Relay a cookie deletion to all siblings.
    pub fn broadcast_delete(&self, raw: &str) {
        self.broadcast("delete_cookie", raw);
    }

    fn broadcast(&self, command: &str, raw: &str) {
        let line = format!("{} {}", command, raw);
        for (index, peer) in self.registry.recipients().iter().enumerate() {
            if let Err(e) = peer.send(&line) {
                tracing::warn!(sibling = index, error = %e, "cookie relay send failed");
            }
        }
    }
}
