//! Validated email address.

use crate::error::{Error, Result};

/// Email address for the SMTP envelope and message headers.
///
/// Construction checks the `local@domain` shape. The header builder in
/// [`crate::codec`] interpolates addresses without any escaping, so this
/// validation is a hard precondition for protocol framing: an `Address`
/// never contains CR, LF, or a stray `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Creates a new address from a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if the string is not of the form
    /// `local@domain` with non-empty parts.
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        let Some((local, domain)) = addr.split_once('@') else {
            return Err(Error::InvalidAddress(format!("missing @ in {addr:?}")));
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(Error::InvalidAddress(format!(
                "malformed address {addr:?}"
            )));
        }
        if addr.chars().any(|c| c == '\r' || c == '\n' || c == '<' || c == '>') {
            return Err(Error::InvalidAddress(format!(
                "forbidden character in {addr:?}"
            )));
        }
        Ok(Self(addr))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
