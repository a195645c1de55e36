//! SMTP reply types.

/// Classification of a complete server reply.
///
/// Positive intermediate replies (3xx, e.g. `354` after DATA) count as
/// `Ready`: the session may proceed. The classifier only reports; whether
/// a non-`Ready` reply aborts the transaction is the session's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    /// Positive completion or intermediate reply (2xx/3xx).
    Ready,
    /// Transient negative completion (4xx).
    TransientError,
    /// Permanent negative completion (5xx).
    PermanentError,
}

/// SMTP reply from the server, possibly multi-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply code from the final line.
    pub code: ReplyCode,
    /// Raw reply lines, in receive order, CRLF stripped.
    pub lines: Vec<String>,
}

impl Reply {
    /// Creates a new reply.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec is not const-compatible
    pub fn new(code: ReplyCode, lines: Vec<String>) -> Self {
        Self { code, lines }
    }

    /// Classification of this reply.
    #[must_use]
    pub const fn category(&self) -> ReplyCategory {
        self.code.category()
    }

    /// The raw reply text, one line per received line.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// SMTP reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// Creates a new reply code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Classification by the code's first digit.
    #[must_use]
    pub const fn category(self) -> ReplyCategory {
        match self.0 / 100 {
            2 | 3 => ReplyCategory::Ready,
            4 => ReplyCategory::TransientError,
            _ => ReplyCategory::PermanentError,
        }
    }
}

impl std::fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Common reply codes
impl ReplyCode {
    /// 220 Service ready
    pub const SERVICE_READY: Self = Self(220);
    /// 221 Service closing transmission channel
    pub const CLOSING: Self = Self(221);
    /// 250 Requested mail action okay, completed
    pub const OK: Self = Self(250);
    /// 354 Start mail input
    pub const START_DATA: Self = Self(354);
    /// 421 Service not available, closing transmission channel
    pub const SERVICE_UNAVAILABLE: Self = Self(421);
    /// 550 Mailbox unavailable (not found, access denied)
    pub const MAILBOX_UNAVAILABLE: Self = Self(550);
    /// 554 Transaction failed
    pub const TRANSACTION_FAILED: Self = Self(554);
}
