//! Whitelist/blacklist accept decision.

use crate::error::ConfigError;
use crate::event::CookieTuple;
use crate::matcher::{Matcher, MatcherList};

/// Two-tier allow-then-deny policy over a cookie tuple.
///
/// Both lists start empty and only ever grow. With a non-empty whitelist a
/// cookie must match it to be considered at all; the blacklist always has
/// final veto.
#[derive(Debug, Clone, Default)]
pub struct AcceptPolicy {
    whitelist: MatcherList,
    blacklist: MatcherList,
}

impl AcceptPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a directive and append it to the whitelist. On a compile
    /// failure nothing is appended and prior matchers remain intact.
    pub fn allow(&mut self, directive: &str) -> Result<(), ConfigError> {
        self.whitelist.push(Matcher::compile(directive)?);
        Ok(())
    }

    /// Compile a directive and append it to the blacklist.
    pub fn deny(&mut self, directive: &str) -> Result<(), ConfigError> {
        self.blacklist.push(Matcher::compile(directive)?);
        Ok(())
    }

    /// Accept a cookie when:
    /// a. the whitelist is empty and the cookie is not blacklisted, or
    /// b. the cookie is whitelisted and not blacklisted.
    pub fn accept(&self, cookie: &CookieTuple) -> bool {
        if !self.whitelist.is_empty() {
            if self.whitelist.matches(cookie) {
                return !self.blacklist.matches(cookie);
            }
            return false;
        }
        !self.blacklist.matches(cookie)
    }
}
