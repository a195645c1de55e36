//! SMTP session driver.
//!
//! One [`SmtpSession`] owns one connection for its whole life. The driver
//! issues commands one at a time, drains each (possibly multi-line) reply,
//! and aborts the transaction on the first non-positive classification.
//! Sessions are reused across sequential mail transactions and closed once.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time;
use tracing::{debug, info, warn};

use crate::codec;
use crate::command::Command;
use crate::error::{Error, Result};
use crate::parser::{is_final_line, parse_reply};
use crate::types::{Address, Reply, ReplyCategory};

/// Pause between establishing the TCP connection and the first protocol
/// exchange. Some servers reject commands arriving too soon after accept.
const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Upper bound on waiting for a single reply line.
const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// Lifecycle of one SMTP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Greeting read and acknowledged; ready for the next transaction.
    Connected,
    /// Between MAIL FROM and the end-of-data acknowledgement.
    InTransaction,
    /// Socket shut down; the session is spent.
    Closed,
}

/// SMTP session driving sequential mail transactions over one connection.
///
/// Generic over the underlying stream so the protocol logic can be
/// exercised against a scripted in-memory stream in tests.
#[derive(Debug)]
pub struct SmtpSession<S> {
    stream: BufReader<S>,
    hostname: String,
    state: SessionState,
}

impl SmtpSession<TcpStream> {
    /// Opens a TCP connection and reads the server greeting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectFailed`] if the TCP connection cannot be
    /// established, and greeting errors as in [`SmtpSession::from_stream`].
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| Error::ConnectFailed {
                host: host.to_string(),
                port,
                source,
            })?;
        debug!(host, port, "connected");
        time::sleep(SETTLE_DELAY).await;
        Self::from_stream(stream, host).await
    }
}

impl<S> SmtpSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps an established stream and performs the greeting handshake.
    ///
    /// `hostname` is announced in EHLO.
    ///
    /// # Errors
    ///
    /// Returns an error if the greeting cannot be read or is not positive.
    pub async fn from_stream(stream: S, hostname: &str) -> Result<Self> {
        let mut session = Self {
            stream: BufReader::new(stream),
            hostname: hostname.to_string(),
            state: SessionState::Connected,
        };
        let greeting = session.read_reply().await?;
        if greeting.category() != ReplyCategory::Ready {
            return Err(Error::Protocol(format!(
                "unexpected greeting: {}",
                greeting.text()
            )));
        }
        debug!(code = %greeting.code, "server greeting");
        Ok(session)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Writes one command line and validates the reply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandRejected`] with the command name and the raw
    /// reply text when the classification is not [`ReplyCategory::Ready`],
    /// or an I/O error from the round trip.
    pub async fn send_command(&mut self, cmd: &Command) -> Result<Reply> {
        let data = cmd.serialize();
        self.stream.get_mut().write_all(&data).await?;
        self.stream.get_mut().flush().await?;

        let reply = self.read_reply().await?;
        debug!(command = %cmd, code = %reply.code, "command round trip");
        if reply.category() != ReplyCategory::Ready {
            return Err(Error::rejected(cmd.name(), reply.text()));
        }
        Ok(reply)
    }

    /// Delivers one message to one recipient set as a single transaction.
    ///
    /// Strict order: EHLO, MAIL FROM, one RCPT TO round trip per recipient,
    /// DATA, the framed payload, then the terminating dot. Any rejection
    /// aborts the whole delivery; there is no partial-recipient fallback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] on a closed session, otherwise any
    /// command rejection or I/O failure from the exchange.
    pub async fn send_mail(
        &mut self,
        from: &Address,
        recipients: &[Address],
        subject: &str,
        body: &str,
    ) -> Result<()> {
        if self.state == SessionState::Closed {
            return Err(Error::InvalidState("session is closed".into()));
        }
        self.state = SessionState::InTransaction;

        let hostname = self.hostname.clone();
        self.send_command(&Command::Ehlo { hostname }).await?;
        self.send_command(&Command::MailFrom { from: from.clone() })
            .await?;
        for to in recipients {
            self.send_command(&Command::RcptTo { to: to.clone() })
                .await?;
        }
        self.send_command(&Command::Data).await?;

        // The payload is opaque framing, not a command awaiting its own
        // reply line; it is written verbatim between DATA and the dot.
        let payload = codec::encode(from, recipients, subject, body);
        self.stream.get_mut().write_all(&payload).await?;
        self.stream.get_mut().flush().await?;

        self.send_command(&Command::EndOfData).await?;
        self.state = SessionState::Connected;
        info!(%from, recipients = recipients.len(), "message accepted");
        Ok(())
    }

    /// Sends QUIT, then shuts the connection down.
    ///
    /// The QUIT round trip is best effort: a peer that has already dropped
    /// the connection is logged, not surfaced.
    ///
    /// # Errors
    ///
    /// Returns an error only from the final socket shutdown.
    pub async fn quit(&mut self) -> Result<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        if let Err(err) = self.send_command(&Command::Quit).await {
            warn!(%err, "QUIT not acknowledged");
        }
        self.close().await
    }

    /// Shuts the socket down. Safe to call more than once; the second and
    /// later calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns the shutdown I/O error, if any. The session counts as
    /// closed either way.
    pub async fn close(&mut self) -> Result<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        self.state = SessionState::Closed;
        self.stream.get_mut().shutdown().await?;
        debug!("session closed");
        Ok(())
    }

    async fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let n = time::timeout(REPLY_TIMEOUT, self.stream.read_line(&mut line))
            .await
            .map_err(|_| Error::ConnectionLost)??;
        if n == 0 {
            return Err(Error::ConnectionLost);
        }
        Ok(line.trim_end().to_string())
    }

    async fn read_reply(&mut self) -> Result<Reply> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await?;
            if line.is_empty() {
                continue;
            }

            let is_last = is_final_line(&line);
            lines.push(line);

            if is_last {
                break;
            }
        }

        parse_reply(&lines)
    }
}
