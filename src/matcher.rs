//! Matcher compilation and evaluation.
//!
//! A matcher directive is an alternating sequence of `(component, pattern)`
//! tokens in the wire quoting, e.g. `domain "\.example\.com$" path "^/"`.
//! The component is a symbolic name from the tuple table or a literal index
//! 0-5; the pattern is a regex tested with substring search against the
//! named field. A matcher list evaluates as OR over matchers, AND within
//! one.

use regex::Regex;

use crate::error::ConfigError;
use crate::event::{self, CookieTuple, FIELD_COUNT};

/// Positional prefix equality between a partial key and a stored cookie.
///
/// Compares field-by-field up to the shorter of the two sequences: an empty
/// key matches every cookie, and a key longer than the candidate compares
/// only the overlapping prefix. This is an equality test, not a pattern
/// match; wildcarding lives in [`Matcher`] patterns only.
pub fn matches_key(key: &[String], cookie: &[String]) -> bool {
    key.iter().zip(cookie.iter()).all(|(k, c)| k == c)
}

/// One conjunction of `(component index, pattern)` predicates.
#[derive(Debug, Clone)]
pub struct Matcher {
    predicates: Vec<(usize, Regex)>,
}

impl Matcher {
    /// Compile a matcher directive.
    ///
    /// Tokens are paired positionally; a trailing unpaired token is ignored.
    /// Fails on an unknown component name, an index above 5, or a pattern
    /// that is not a valid regex.
    pub fn compile(directive: &str) -> Result<Self, ConfigError> {
        let tokens = event::splitquoted(directive);
        let mut predicates = Vec::new();
        for pair in tokens.chunks_exact(2) {
            let component = Self::component(&pair[0])?;
            let pattern = Regex::new(&pair[1])?;
            predicates.push((component, pattern));
        }
        Ok(Self { predicates })
    }

    fn component(token: &str) -> Result<usize, ConfigError> {
        if let Some(index) = event::component_index(token) {
            return Ok(index);
        }
        let index: usize = token
            .parse()
            .map_err(|_| ConfigError::UnknownComponent(token.to_string()))?;
        if index >= FIELD_COUNT {
            return Err(ConfigError::ComponentOutOfRange(index));
        }
        Ok(index)
    }

    /// True iff every predicate finds a match in its cookie field.
    pub fn matches(&self, cookie: &CookieTuple) -> bool {
        self.predicates
            .iter()
            .all(|(component, pattern)| pattern.is_match(cookie.field(*component)))
    }
}

/// An append-only ordered list of matchers, evaluated as a disjunction.
#[derive(Debug, Clone, Default)]
pub struct MatcherList {
    matchers: Vec<Matcher>,
}

impl MatcherList {
    pub fn push(&mut self, matcher: Matcher) {
        self.matchers.push(matcher);
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// True iff at least one matcher accepts the cookie.
    pub fn matches(&self, cookie: &CookieTuple) -> bool {
        self.matchers.iter().any(|m| m.matches(cookie))
    }
}
