//! Error types.

use thiserror::Error;

/// Failure to compile a matcher directive.
///
/// These are configuration errors: the offending directive is reported and
/// discarded, and previously installed matchers remain intact.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown cookie component {0:?}")]
    UnknownComponent(String),
    #[error("cookie component index {0} out of range (expected 0-5)")]
    ComponentOutOfRange(usize),
    #[error("invalid matcher pattern")]
    InvalidPattern(#[from] regex::Error),
}

/// Failure while handling or persisting a cookie event.
///
/// `Io` failures (permissions, disk full) are fatal for the operation that
/// triggered them and are distinct from the silent "no matching cookie"
/// outcome, which is not an error at all.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed cookie event {raw:?}: {reason}")]
    MalformedEvent { raw: String, reason: &'static str },
    #[error("cookie store I/O failed")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn malformed(raw: &str, reason: &'static str) -> Self {
        Self::MalformedEvent {
            raw: raw.to_string(),
            reason,
        }
    }
}
