//! Error types for SMTP operations.

use std::io;

/// Result type alias for SMTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// SMTP error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TCP connection could not be established.
    #[error("connect to {host}:{port} failed: {source}")]
    ConnectFailed {
        /// Server host.
        host: String,
        /// Server port.
        port: u16,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Peer closed the connection before a final reply line was seen.
    #[error("connection lost while waiting for a server reply")]
    ConnectionLost,

    /// Server answered a command with a 4xx/5xx reply.
    #[error("{command} rejected by server: {reply}")]
    CommandRejected {
        /// Name of the offending command.
        command: String,
        /// Raw reply text, all lines.
        reply: String,
    },

    /// Malformed server reply.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Invalid email address.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// Operation not valid in the session's current state.
    #[error("invalid session state: {0}")]
    InvalidState(String),
}

impl Error {
    /// Creates a rejection error from a command name and the raw reply.
    #[must_use]
    pub fn rejected(command: impl Into<String>, reply: impl Into<String>) -> Self {
        Self::CommandRejected {
            command: command.into(),
            reply: reply.into(),
        }
    }
}
