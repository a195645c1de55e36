//! Campaign message model.

use serde::Deserialize;

/// One candidate message: an immutable subject/body pair.
///
/// Both fields are expected to be non-blank; [`Config::validate`] enforces
/// that before planning starts.
///
/// [`Config::validate`]: crate::config::Config::validate
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    /// Subject line (plain text; encoded at the protocol layer).
    pub subject: String,
    /// Message body (plain text; encoded at the protocol layer).
    pub body: String,
}

impl Message {
    /// True when either field is empty after trimming whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.subject.trim().is_empty() || self.body.trim().is_empty()
    }
}
