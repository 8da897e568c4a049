//! Cookie storage backends.
//!
//! Three variants share one behavioral contract: a null store that discards
//! everything, an in-memory list store, and a text store backed by a
//! cookie-jar file in the historical Netscape `cookies.txt` format. The
//! variant is selected by configuration ([`crate::config::StoreConfig`]),
//! not by type tricks.
//!
//! All variants uphold the dedup rule: before an insert, any existing entry
//! whose (domain, path, name) key matches is removed, so at most one live
//! entry per key survives.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::event::{self, CookieKey, CookieTuple};
use crate::matcher::matches_key;

/// Header comment written once when a cookie-jar file is first created.
const JAR_HEADER: &str = "# HTTP Cookie File";

/// Marker prefix for HttpOnly rows in the jar; the row is still a live
/// cookie, unlike ordinary `#` comment lines.
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// Shared contract for cookie storage backends.
pub trait CookieStore {
    /// Insert a cookie, replacing any existing entry with the same
    /// (domain, path, name) key.
    fn add_cookie(&mut self, raw: &str, cookie: &CookieTuple) -> Result<(), StoreError>;

    /// Remove every stored entry whose tuple matches `key` under the
    /// positional prefix rule. Removing nothing is not an error.
    fn delete_cookie(&mut self, key: &CookieKey) -> Result<(), StoreError>;
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl CookieStore for NullStore {
    fn add_cookie(&mut self, _raw: &str, _cookie: &CookieTuple) -> Result<(), StoreError> {
        Ok(())
    }

    fn delete_cookie(&mut self, _key: &CookieKey) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Ordered in-memory list of raw cookie-event lines.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl CookieStore for MemoryStore {
    fn add_cookie(&mut self, raw: &str, cookie: &CookieTuple) -> Result<(), StoreError> {
        self.delete_cookie(&cookie.storage_key())?;
        self.entries.push(raw.to_string());
        Ok(())
    }

    fn delete_cookie(&mut self, key: &CookieKey) -> Result<(), StoreError> {
        self.entries
            .retain(|raw| !matches_key(key.fields(), &event::splitquoted(raw)));
        Ok(())
    }
}

/// Cookie-jar file in the Netscape `cookies.txt` format.
///
/// One cookie per line, 7 tab-separated columns:
/// `domain \t host-only \t path \t secure \t expires \t name \t value`.
/// Lines beginning `#` are comments, except the `#HttpOnly_<domain>` marker.
///
/// The file handle is opened per operation and never held across events.
/// Deletion reads the whole file and rewrites the surviving rows, so the
/// file is always a consistent full snapshot; comment and malformed rows
/// pass through rewrites untouched. This scales linearly with jar size and
/// takes no cross-process lock, which is fine for the intended
/// one-writer-per-jar setups.
#[derive(Debug, Clone)]
pub struct TextStore {
    path: PathBuf,
}

impl TextStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Decode a jar row back to a cookie tuple.
    ///
    /// Returns `None` for comment rows, rows with fewer than 7 columns, and
    /// rows whose secure column is not `TRUE`/`FALSE` - "not a cookie", so
    /// the caller preserves the line verbatim.
    pub fn as_event(columns: &[&str]) -> Option<CookieTuple> {
        let first = columns.first()?;
        let domain = if let Some(rest) = first.strip_prefix(HTTP_ONLY_PREFIX) {
            rest
        } else if first.starts_with('#') {
            return None;
        } else {
            first
        };

        if columns.len() < 7 {
            return None;
        }
        let scheme = match columns[3] {
            "TRUE" => "https",
            "FALSE" => "http",
            _ => return None,
        };

        Some(CookieTuple::new(
            domain, columns[2], columns[5], columns[6], scheme, columns[4],
        ))
    }

    /// Encode a cookie tuple as a jar row.
    pub fn as_file(cookie: &CookieTuple) -> String {
        let host_only = if cookie.domain().starts_with('.') {
            "TRUE"
        } else {
            "FALSE"
        };
        let secure = if cookie.scheme() == "https" {
            "TRUE"
        } else {
            "FALSE"
        };
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            cookie.domain(),
            host_only,
            cookie.path(),
            secure,
            cookie.expires(),
            cookie.name(),
            cookie.value()
        )
    }
}

impl CookieStore for TextStore {
    fn add_cookie(&mut self, _raw: &str, cookie: &CookieTuple) -> Result<(), StoreError> {
        // Drop any row sharing the (domain, path, name) key first.
        self.delete_cookie(&cookie.storage_key())?;

        let first = !self.path.exists();
        if first {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if first {
            writeln!(file, "{}", JAR_HEADER)?;
        }
        writeln!(file, "{}", Self::as_file(cookie))?;
        Ok(())
    }

    fn delete_cookie(&mut self, key: &CookieKey) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut survivors = Vec::new();
        let mut dropped = 0usize;
        for line in content.lines() {
            let columns: Vec<&str> = line.split('\t').collect();
            match Self::as_event(&columns) {
                Some(cookie) if matches_key(key.fields(), cookie.fields()) => dropped += 1,
                _ => survivors.push(line),
            }
        }
        if dropped > 0 {
            tracing::debug!(
                path = %self.path.display(),
                dropped,
                kept = survivors.len(),
                "rewrote cookie jar"
            );
        }

        let mut output = survivors.join("\n");
        if !output.is_empty() {
            output.push('\n');
        }
        fs::write(&self.path, output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cookie(domain: &str, path: &str, name: &str, value: &str) -> CookieTuple {
        CookieTuple::new(domain, path, name, value, "https", "1735689600")
    }

    fn key(parts: &[&str]) -> CookieKey {
        CookieKey::from_fields(parts.iter().map(|s| s.to_string()).collect())
    }

    fn read(store: &TextStore) -> String {
        fs::read_to_string(store.path()).unwrap()
    }

    #[test]
    fn row_event_round_trip() {
        let row = "example.com\tFALSE\t/\tTRUE\t1735689600\tsid\tabc123";
        let columns: Vec<&str> = row.split('\t').collect();
        let tuple = TextStore::as_event(&columns).unwrap();
        assert_eq!(TextStore::as_file(&tuple), row);

        let dotted = ".example.com\tTRUE\t/\tFALSE\t0\tuser\tjohn";
        let columns: Vec<&str> = dotted.split('\t').collect();
        let tuple = TextStore::as_event(&columns).unwrap();
        assert_eq!(tuple.scheme(), "http");
        assert_eq!(TextStore::as_file(&tuple), dotted);
    }

    #[test]
    fn http_only_marker_is_a_live_cookie() {
        let row = "#HttpOnly_example.com\tFALSE\t/\tTRUE\t0\tsid\tabc";
        let columns: Vec<&str> = row.split('\t').collect();
        let tuple = TextStore::as_event(&columns).unwrap();
        assert_eq!(tuple.domain(), "example.com");
    }

    #[test]
    fn comments_and_malformed_rows_are_not_cookies() {
        assert!(TextStore::as_event(&["# a comment"]).is_none());
        assert!(TextStore::as_event(&["example.com", "FALSE", "/"]).is_none());
        // Secure column must be TRUE/FALSE.
        assert!(TextStore::as_event(&[
            "example.com",
            "FALSE",
            "/",
            "maybe",
            "0",
            "sid",
            "abc"
        ])
        .is_none());
    }

    #[test]
    fn first_write_emits_header() {
        let dir = tempdir().unwrap();
        let mut store = TextStore::new(dir.path().join("cookies.txt"));
        store
            .add_cookie("raw", &cookie("example.com", "/", "sid", "abc"))
            .unwrap();

        let content = read(&store);
        assert!(content.starts_with("# HTTP Cookie File\n"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn insert_dedups_on_domain_path_name() {
        let dir = tempdir().unwrap();
        let mut store = TextStore::new(dir.path().join("cookies.txt"));
        store
            .add_cookie("raw", &cookie("example.com", "/", "sid", "old"))
            .unwrap();
        store
            .add_cookie("raw", &cookie("example.com", "/", "sid", "new"))
            .unwrap();
        // Different name: kept alongside.
        store
            .add_cookie("raw", &cookie("example.com", "/", "lang", "en"))
            .unwrap();

        let content = read(&store);
        let rows: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with("sid\tnew"));
        assert!(rows[1].ends_with("lang\ten"));
    }

    #[test]
    fn delete_by_partial_key_preserves_unrelated_rows_and_order() {
        let dir = tempdir().unwrap();
        let mut store = TextStore::new(dir.path().join("cookies.txt"));
        store
            .add_cookie("raw", &cookie("keep.org", "/", "a", "1"))
            .unwrap();
        store
            .add_cookie("raw", &cookie("example.com", "/", "b", "2"))
            .unwrap();
        store
            .add_cookie("raw", &cookie("keep.org", "/x", "c", "3"))
            .unwrap();

        store.delete_cookie(&key(&["example.com"])).unwrap();

        let content = read(&store);
        let rows: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("keep.org\t"));
        assert!(rows[0].contains("\ta\t"));
        assert!(rows[1].contains("\tc\t"));
    }

    #[test]
    fn delete_matches_http_only_rows_by_stripped_domain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.txt");
        fs::write(
            &path,
            "# HTTP Cookie File\n#HttpOnly_example.com\tFALSE\t/\tTRUE\t0\tsid\tabc\n",
        )
        .unwrap();

        let mut store = TextStore::new(&path);
        store.delete_cookie(&key(&["example.com"])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "# HTTP Cookie File\n");
    }

    #[test]
    fn rewrite_passes_comments_and_junk_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.txt");
        fs::write(
            &path,
            "# HTTP Cookie File\n# a comment\nnot\ta\tcookie\nexample.com\tFALSE\t/\tTRUE\t0\tsid\tabc\n",
        )
        .unwrap();

        let mut store = TextStore::new(&path);
        store.delete_cookie(&key(&["example.com"])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "# HTTP Cookie File\n# a comment\nnot\ta\tcookie\n");
    }

    #[test]
    fn delete_on_missing_file_is_a_noop() {
        let dir = tempdir().unwrap();
        let mut store = TextStore::new(dir.path().join("absent.txt"));
        store.delete_cookie(&key(&["example.com"])).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn memory_store_dedups_and_deletes() {
        let mut store = MemoryStore::new();
        let old = "example.com / sid old https 0";
        let new = "example.com / sid new https 0";
        let other = "other.net / sid x https 0";
        store
            .add_cookie(old, &CookieTuple::parse(old).unwrap())
            .unwrap();
        store
            .add_cookie(other, &CookieTuple::parse(other).unwrap())
            .unwrap();
        store
            .add_cookie(new, &CookieTuple::parse(new).unwrap())
            .unwrap();
        assert_eq!(store.entries(), [other, new]);

        store.delete_cookie(&key(&["example.com"])).unwrap();
        assert_eq!(store.entries(), [other]);
    }

    #[test]
    fn null_store_discards() {
        let mut store = NullStore;
        let c = cookie("example.com", "/", "sid", "abc");
        store.add_cookie("raw", &c).unwrap();
        store.delete_cookie(&key(&[])).unwrap();
    }
}
