//! Cookie tuple and key types, plus the shell-quoted wire format they
//! travel in.
//!
//! A cookie event is a single text line of shell-quoted, whitespace-separated
//! fields. An add event carries the full 6-field tuple; a delete event
//! carries a 1-6 field prefix of it.

use crate::error::StoreError;

/// Number of fields in a full cookie tuple.
pub const FIELD_COUNT: usize = 6;

/// Symbolic names for the components of the cookie tuple, in positional
/// order. This mapping is shared by matcher directives and the on-disk
/// encoding; reordering it breaks compatibility with existing cookie jars.
pub const COMPONENT_NAMES: [&str; FIELD_COUNT] =
    ["domain", "path", "name", "value", "scheme", "expires"];

/// Look up a symbolic component name, returning its tuple index.
pub fn component_index(name: &str) -> Option<usize> {
    COMPONENT_NAMES.iter().position(|n| *n == name)
}

/// Split a wire-format line into fields.
///
/// Whitespace separates fields; single- or double-quoted substrings are kept
/// as one field (quotes stripped); a backslash escapes the next character,
/// both bare and inside double quotes. A quoted empty string produces an
/// empty field, which is how a session cookie's blank `expires` travels.
pub fn splitquoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_field = false;
    let mut quote: Option<char> = None;

    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                } else if c == '\\' && q == '"' {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                } else {
                    current.push(c);
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    quote = Some(c);
                    in_field = true;
                } else if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                        in_field = true;
                    }
                } else if c.is_whitespace() {
                    if in_field {
                        fields.push(std::mem::take(&mut current));
                        in_field = false;
                    }
                } else {
                    current.push(c);
                    in_field = true;
                }
            }
        }
    }
    if in_field || quote.is_some() {
        fields.push(current);
    }
    fields
}

/// The canonical 6-field cookie record.
///
/// Field order is fixed: `domain=0, path=1, name=2, value=3, scheme=4,
/// expires=5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieTuple {
    fields: [String; FIELD_COUNT],
}

impl CookieTuple {
    pub fn new(
        domain: impl Into<String>,
        path: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        scheme: impl Into<String>,
        expires: impl Into<String>,
    ) -> Self {
        Self {
            fields: [
                domain.into(),
                path.into(),
                name.into(),
                value.into(),
                scheme.into(),
                expires.into(),
            ],
        }
    }

    /// Parse an add-event line. Fails unless it carries exactly 6 fields.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let fields = splitquoted(raw);
        let fields: [String; FIELD_COUNT] = fields
            .try_into()
            .map_err(|_| StoreError::malformed(raw, "expected exactly 6 fields"))?;
        Ok(Self { fields })
    }

    pub fn domain(&self) -> &str {
        &self.fields[0]
    }

    pub fn path(&self) -> &str {
        &self.fields[1]
    }

    pub fn name(&self) -> &str {
        &self.fields[2]
    }

    pub fn value(&self) -> &str {
        &self.fields[3]
    }

    pub fn scheme(&self) -> &str {
        &self.fields[4]
    }

    pub fn expires(&self) -> &str {
        &self.fields[5]
    }

    /// Positional access, as used by compiled matchers.
    pub fn field(&self, index: usize) -> &str {
        &self.fields[index]
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// A cookie with a blank `expires` lives only for the browsing session.
    pub fn expires_with_session(&self) -> bool {
        self.fields[5].is_empty()
    }

    /// The (domain, path, name) key under which at most one live entry may
    /// exist in a store.
    pub fn storage_key(&self) -> CookieKey {
        CookieKey::from_fields(self.fields[..3].to_vec())
    }
}

/// A partial cookie key: a 0-6 field prefix of the tuple, used for matching
/// and deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieKey {
    fields: Vec<String>,
}

impl CookieKey {
    /// Parse a delete-event line. Fails on an empty line or more than 6
    /// fields.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let fields = splitquoted(raw);
        if fields.is_empty() {
            return Err(StoreError::malformed(raw, "expected at least 1 field"));
        }
        if fields.len() > FIELD_COUNT {
            return Err(StoreError::malformed(raw, "expected at most 6 fields"));
        }
        Ok(Self { fields })
    }

    pub fn from_fields(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A full key names all 6 fields and therefore identifies the store
    /// (session vs persistent) that owns the cookie.
    pub fn is_full(&self) -> bool {
        self.fields.len() == FIELD_COUNT
    }

    /// For a full key, whether the cookie it names is session-scoped.
    pub fn expires_with_session(&self) -> bool {
        self.fields.get(5).is_some_and(|e| e.is_empty())
    }
}

impl From<&CookieTuple> for CookieKey {
    fn from(cookie: &CookieTuple) -> Self {
        Self {
            fields: cookie.fields.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitquoted_plain_fields() {
        assert_eq!(
            splitquoted("example.com / sid abc123 https 0"),
            vec!["example.com", "/", "sid", "abc123", "https", "0"]
        );
    }

    #[test]
    fn splitquoted_preserves_quoted_substrings() {
        assert_eq!(
            splitquoted(r#"example.com / sid "a value with spaces" https 0"#),
            vec!["example.com", "/", "sid", "a value with spaces", "https", "0"]
        );
        assert_eq!(splitquoted("'one field' two"), vec!["one field", "two"]);
    }

    #[test]
    fn splitquoted_quoted_empty_field() {
        assert_eq!(
            splitquoted(r#"example.com / sid abc123 https """#),
            vec!["example.com", "/", "sid", "abc123", "https", ""]
        );
    }

    #[test]
    fn splitquoted_backslash_escapes() {
        assert_eq!(splitquoted(r"a\ b c"), vec!["a b", "c"]);
        assert_eq!(splitquoted(r#""a \" b""#), vec![r#"a " b"#]);
    }

    #[test]
    fn splitquoted_collapses_whitespace() {
        assert_eq!(splitquoted("  a \t b  "), vec!["a", "b"]);
        assert!(splitquoted("   ").is_empty());
    }

    #[test]
    fn tuple_parse_requires_six_fields() {
        assert!(CookieTuple::parse("example.com / sid abc123 https 0").is_ok());
        assert!(CookieTuple::parse("example.com / sid").is_err());
        assert!(CookieTuple::parse("a b c d e f g").is_err());
    }

    #[test]
    fn key_parse_accepts_partial() {
        let key = CookieKey::parse("example.com /").unwrap();
        assert_eq!(key.len(), 2);
        assert!(!key.is_full());

        assert!(CookieKey::parse("").is_err());
        assert!(CookieKey::parse("a b c d e f g").is_err());
    }

    #[test]
    fn session_scoping_follows_expires_field() {
        let session = CookieTuple::new("example.com", "/", "sid", "abc", "https", "");
        let persistent = CookieTuple::new("example.com", "/", "sid", "abc", "https", "1735689600");
        assert!(session.expires_with_session());
        assert!(!persistent.expires_with_session());
    }

    #[test]
    fn component_names_map_to_indices() {
        assert_eq!(component_index("domain"), Some(0));
        assert_eq!(component_index("expires"), Some(5));
        assert_eq!(component_index("nonsense"), None);
    }
}
