//! DATA payload framing.
//!
//! Builds the RFC 5322-style message written verbatim after the server
//! acknowledges `DATA`: address headers, a base64-encoded subject, and a
//! base64-encoded body, all CRLF terminated.

use std::fmt::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::types::Address;

/// Builds the DATA payload for one message.
///
/// Subject and body are carried as standard padded base64 over their UTF-8
/// bytes, so neither can break protocol framing, and no base64 line ever
/// starts with a dot. Addresses are interpolated without escaping; their
/// shape is [`Address`]'s construction invariant.
///
/// The output is opaque to the session driver and is not followed by the
/// terminating `.` line; the session sends that as its own command.
#[must_use]
pub fn encode(from: &Address, recipients: &[Address], subject: &str, body: &str) -> Vec<u8> {
    let to_list = recipients
        .iter()
        .map(|r| format!("<{r}>"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut payload = String::new();
    let _ = write!(payload, "From: <{from}>\r\n");
    let _ = write!(payload, "To: {to_list}\r\n");
    let _ = write!(
        payload,
        "Subject:=?utf-8?B?{}?=\r\n",
        STANDARD.encode(subject.as_bytes())
    );
    payload.push_str("Content-Transfer-Encoding: base64\r\n");
    payload.push_str("\r\n");
    payload.push_str(&STANDARD.encode(body.as_bytes()));
    payload.push_str("\r\n\r\n");

    payload.into_bytes()
}
