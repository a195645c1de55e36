//! # mailsalvo-smtp
//!
//! A minimal, hand-rolled SMTP session driver (no mail-transport library).
//!
//! The crate owns the command/response protocol state machine for one TCP
//! connection: connect, read the greeting, then drive any number of
//! sequential mail transactions (EHLO, MAIL FROM, RCPT TO, DATA, payload,
//! terminating dot) before QUIT. Server replies are read line by line and
//! classified; any non-positive classification aborts the transaction with
//! the offending command and the raw reply text.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailsalvo_smtp::{Address, SmtpSession};
//!
//! #[tokio::main]
//! async fn main() -> mailsalvo_smtp::Result<()> {
//!     let mut session = SmtpSession::connect("mail.example.com", 25).await?;
//!
//!     let from = Address::new("sender@example.com")?;
//!     let to = [Address::new("recipient@example.com")?];
//!     session.send_mail(&from, &to, "Subject", "Body").await?;
//!
//!     session.quit().await
//! }
//! ```
//!
//! ## Scope
//!
//! Plain-text SMTP only: no STARTTLS, no AUTH, no pipelining, no retries.
//! One in-flight command at a time on one blocking-style connection.
//!
//! ## Modules
//!
//! - [`command`]: SMTP command serialization
//! - [`codec`]: DATA payload framing (headers + base64 content)
//! - [`parser`]: reply line grammar and classification
//! - [`session`]: the connection state machine
//! - [`types`]: addresses and server replies

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod command;
mod error;
pub mod parser;
pub mod session;
pub mod types;

pub use command::Command;
pub use error::{Error, Result};
pub use session::{SessionState, SmtpSession};
pub use types::{Address, Reply, ReplyCategory, ReplyCode};
