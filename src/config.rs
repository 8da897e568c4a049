//! Store selection and default file locations.

use std::env;
use std::path::PathBuf;

use crate::store::{CookieStore, MemoryStore, NullStore, TextStore};

/// Which storage backend to construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Discard everything.
    Null,
    /// Keep raw cookie events in memory only.
    Memory,
    /// Persist to a cookie-jar text file at the given path.
    Text(PathBuf),
}

impl StoreConfig {
    pub fn build(&self) -> Box<dyn CookieStore> {
        match self {
            StoreConfig::Null => Box::new(NullStore),
            StoreConfig::Memory => Box::new(MemoryStore::new()),
            StoreConfig::Text(path) => Box::new(TextStore::new(path)),
        }
    }
}

/// Base directory for user data, following the XDG fallback chain:
/// `$XDG_DATA_HOME`, else `$HOME/.local/share`.
pub fn data_home() -> PathBuf {
    env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(env::var("HOME").unwrap_or_default()).join(".local/share")
        })
}

/// Default location of the persistent cookie jar.
pub fn default_cookie_path() -> PathBuf {
    data_home().join("cookierelay/cookies.txt")
}

/// Default location of the session cookie jar.
pub fn default_session_cookie_path() -> PathBuf {
    data_home().join("cookierelay/session-cookies.txt")
}

/// Storage configuration for one instance: a session store for cookies
/// without an expiry, and a persistent store for the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub session: StoreConfig,
    pub persistent: StoreConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session: StoreConfig::Text(default_session_cookie_path()),
            persistent: StoreConfig::Text(default_cookie_path()),
        }
    }
}

impl Settings {
    /// Memory-backed stores, for tests and embedders that manage their own
    /// persistence.
    pub fn in_memory() -> Self {
        Self {
            session: StoreConfig::Memory,
            persistent: StoreConfig::Memory,
        }
    }

    /// Construct the `(session, persistent)` store pair.
    pub fn build(&self) -> (Box<dyn CookieStore>, Box<dyn CookieStore>) {
        (self.session.build(), self.persistent.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_live_under_data_home() {
        let path = default_cookie_path();
        assert!(path.ends_with("cookierelay/cookies.txt"));
        let session = default_session_cookie_path();
        assert!(session.ends_with("cookierelay/session-cookies.txt"));
    }

    #[test]
    fn store_config_builds_each_variant() {
        // Smoke test: each variant constructs without touching the disk.
        StoreConfig::Null.build();
        StoreConfig::Memory.build();
        StoreConfig::Text(PathBuf::from("/tmp/nonexistent/cookies.txt")).build();
    }
}
