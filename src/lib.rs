//! # cookierelay
//!
//! Cookie filtering, persistence, and relay for cooperating browser
//! instances.
//!
//! `cookierelay` decides whether an incoming cookie event should be accepted
//! or rejected against configurable whitelist/blacklist matcher rules,
//! durably records accepted cookies in a Netscape-compatible cookie-jar text
//! file, and fans accepted/deleted cookie events out to sibling instances.
//!
//! ## Features
//!
//! - **Matching**: a small matcher DSL over the 6-field cookie tuple, with
//!   substring regex patterns and OR-of-ANDs evaluation
//! - **Policy**: two-tier allow-then-deny; the blacklist always has final veto
//! - **Storage**: pluggable null / in-memory / text-file stores behind one
//!   [`CookieStore`](store::CookieStore) contract, with at most one live row
//!   per (domain, path, name) key
//! - **Cookie jar**: the historical tab-separated `cookies.txt` format,
//!   including `#HttpOnly_` marker rows and comment passthrough
//! - **Relay**: fire-and-forget broadcast to sibling instances through a
//!   [`PeerRegistry`](relay::PeerRegistry) supplied by the host
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cookierelay::config::Settings;
//! use cookierelay::manager::CookieManager;
//!
//! let (session, persistent) = Settings::default().build();
//! let mut manager = CookieManager::new(session, persistent, registry, origin);
//!
//! manager.on_blacklist(r#"domain "\.doubleclick\.net$""#)?;
//! manager.on_add_cookie(r#"example.com / sid abc123 https """#)?;
//! ```
//!
//! ## Modules
//!
//! - [`event`] - Cookie tuple and key types, wire-format tokenizer
//! - [`matcher`] - Matcher compilation and evaluation
//! - [`policy`] - Whitelist/blacklist accept decision
//! - [`store`] - Null, in-memory, and cookie-jar file stores
//! - [`relay`] - Sibling fan-out
//! - [`config`] - Store selection and default file locations
//! - [`manager`] - Event orchestration
//!
//! ## Concurrency
//!
//! The crate is single-threaded and event-driven: each inbound event is
//! handled to completion before the next. No cross-process lock is taken on
//! a shared cookie file; concurrent writers from separate processes can race
//! (lost updates, interleaved rewrites). Hosts that share one jar between
//! processes should add a file lock or a single-writer discipline.

pub mod config;
pub mod error;
pub mod event;
pub mod manager;
pub mod matcher;
pub mod policy;
pub mod relay;
pub mod store;
